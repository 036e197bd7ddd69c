//! Per-account preferences: notification settings and theme.

mod model;

pub use model::*;
