use anyhow::Context;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use tempfile::NamedTempFile;

static TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("data");

/// redb file that lives as long as the server.
pub struct Redb {
    _f: NamedTempFile,
    db: Database,
}

impl Redb {
    pub fn new() -> anyhow::Result<Self> {
        let f = NamedTempFile::new().context("cannot create redb file")?;
        let db = Database::create(f.path()).context("cannot open redb database")?;
        Ok(Redb { _f: f, db })
    }
}

impl crate::database::Database for Redb {
    fn init(&self) -> anyhow::Result<()> {
        let tx = self.db.begin_write()?;
        {
            let _ = tx.open_table(TABLE)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get(&self, key: &[u8]) -> anyhow::Result<Option<Vec<u8>>> {
        let tx = self.db.begin_read()?;
        let t = tx.open_table(TABLE)?;
        Ok(t.get(key)?.map(|v| v.value().to_vec()))
    }

    fn set(&self, key: &[u8], value: &[u8]) -> anyhow::Result<()> {
        let tx = self.db.begin_write()?;
        {
            let mut t = tx.open_table(TABLE)?;
            t.insert(key, value)?;
        }
        tx.commit()?;
        Ok(())
    }
}
