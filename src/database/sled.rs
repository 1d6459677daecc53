use crate::database::Database;
use anyhow::Context;
use tempfile::TempDir;

/// sled tree in a temporary directory removed on drop.
pub struct Sled {
    db: sled::Db,
    _f: TempDir,
}

impl Sled {
    pub fn new() -> anyhow::Result<Self> {
        let f = TempDir::new().context("cannot create sled directory")?;
        let db = sled::open(f.path()).context("cannot open sled database")?;
        Ok(Sled { db, _f: f })
    }
}

impl Database for Sled {
    fn init(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn get(&self, key: &[u8]) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    fn set(&self, key: &[u8], value: &[u8]) -> anyhow::Result<()> {
        self.db.insert(key, value)?;
        Ok(())
    }
}
