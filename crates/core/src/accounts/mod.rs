//! Account and profile domain models.

mod model;

pub use model::*;
