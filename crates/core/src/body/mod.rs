//! Body tracking: weight entries, measurements, and progress photos.

mod model;

pub use model::*;
