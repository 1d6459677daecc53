mod mem_btree;
mod redb;
mod sled;

use anyhow::Result;
use clap::ValueEnum;
use std::sync::Arc;

pub use crate::database::mem_btree::MemBTree;
pub use crate::database::redb::Redb;
pub use crate::database::sled::Sled;

/// Storage behind the reference server.
pub trait Database: Send + Sync {
    fn init(&self) -> Result<()>;
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &[u8], value: &[u8]) -> Result<()>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
// Update get_db when adding new variation
pub enum DatabaseType {
    MemBtree,
    Sled,
    Redb,
}

pub fn get_db(database: DatabaseType) -> Result<Arc<dyn Database>> {
    let db: Arc<dyn Database> = match database {
        DatabaseType::MemBtree => Arc::new(MemBTree::default()),
        DatabaseType::Sled => Arc::new(Sled::new()?),
        DatabaseType::Redb => Arc::new(Redb::new()?),
    };
    db.init()?;
    Ok(db)
}
