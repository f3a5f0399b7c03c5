//! KvStore implementations
//!
//! PostgreSQL for deployments and an in-memory map for tests and local runs.

mod error;
mod memory;
mod postgres;

pub use error::map_db_error;
pub use memory::MemoryKvStore;
pub use postgres::PgKvStore;
