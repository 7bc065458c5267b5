//! Display backend trait
//!
//! Defines the interface the render engine uses to push frames out.

use vitrine_core::traits::{DisplayDriver, DisplayError};

use crate::framebuffer::Framebuffer;

/// Display backend trait
///
/// Provides a hardware-agnostic interface for panels that take a full
/// 128x64 monochrome frame. Readiness and panel enable come from
/// [`DisplayDriver`].
pub trait DisplayBackend: DisplayDriver {
    /// Send the whole framebuffer to the panel
    fn flush(&mut self, framebuffer: &Framebuffer) -> Result<(), DisplayError>;
}
