//! Hardware abstraction traits
//!
//! These traits define the interface between the rotation logic and the
//! render engine / display driver implementations.

pub mod display;

pub use display::{DisplayDriver, DisplayError, RenderEngine, StartupError};
