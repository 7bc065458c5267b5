//! Demo rotation scheduler
//!
//! [`Rotation`] is the pure cursor/timer state and can be driven by a
//! simulated clock. [`RotationController`] wraps it around a render engine
//! and a blocking delay to form the firmware's main loop.

pub mod controller;
pub mod rotation;

pub use controller::{CycleReport, RotationController};
pub use rotation::Rotation;
