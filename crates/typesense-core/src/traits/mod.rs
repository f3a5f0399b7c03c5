//! Port traits implemented by the infrastructure layer

mod store;

pub use store::{KvStore, StoreResult};
