//! The three interchangeable remote backend adapters behind the contracts in
//! `gymtrack_core::backend`: a local-only null variant, a document-store
//! variant, and a relational variant. Exactly one is active per build,
//! selected by [`BackendConfig`] at startup.

mod config;
mod document;
mod http;
mod local;
mod relational;
mod session;

pub use config::{create_backend, BackendConfig, DocumentConfig, RelationalConfig};
pub use document::DocumentBackend;
pub use local::LocalBackend;
pub use relational::{rows, RelationalBackend};

#[cfg(test)]
mod test_support;
