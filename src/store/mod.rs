//! Node repositories: the trait the resolver reads through, plus in-memory
//! and SQLite implementations

mod memory;
mod repository;
pub mod sqlite;

pub use memory::MemoryStore;
pub use repository::{NodeLookup, NodeRepository, StoreError, StoreResult};
pub use sqlite::SqliteStore;
