//! Common identifiers and status types shared by CourseGate crates.

pub mod types;

pub use types::*;
