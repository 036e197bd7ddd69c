//! Reusable workout templates.

mod model;

pub use model::*;
