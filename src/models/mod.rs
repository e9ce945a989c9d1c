//! Domain models
//!
//! Database rows and the conversions into the rule engine's inputs.

pub mod curriculum;
pub mod enrollment;
pub mod homework;
pub mod learner;
pub mod progress;

pub use curriculum::*;
pub use enrollment::*;
pub use homework::*;
pub use learner::*;
pub use progress::*;
