//! Small pure helpers

pub mod color;
pub mod diff;
