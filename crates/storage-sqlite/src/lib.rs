//! SQLite-backed implementation of the local cache contract.

mod cache;

pub use cache::SqliteCacheStore;
