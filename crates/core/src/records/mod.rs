//! Personal records, derived from finalized sessions.

mod model;

pub use model::*;
