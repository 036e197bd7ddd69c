//! Workout session domain: sessions, exercise entries, and sets.

mod model;

pub use model::*;
