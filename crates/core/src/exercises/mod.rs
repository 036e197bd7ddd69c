//! Exercise catalog: built-in seed entries plus per-account custom entries.

mod catalog;
mod model;

pub use catalog::builtin_catalog;
pub use model::*;
