//! User-defined fitness goals.

mod model;

pub use model::*;
