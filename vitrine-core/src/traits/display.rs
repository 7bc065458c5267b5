//! Display driver and render engine traits

use crate::demo::DemoId;
use crate::graphics::CanvasError;

/// Errors that can occur while drawing or talking to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Communication,
    /// Driver used before a successful init
    NotInitialized,
    /// Drawing primitive rejected its arguments
    Canvas(CanvasError),
    /// Scene has no room for another widget
    SceneFull,
}

impl From<CanvasError> for DisplayError {
    fn from(err: CanvasError) -> Self {
        DisplayError::Canvas(err)
    }
}

/// Fatal errors before the rotation loop starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    /// Display reported not ready
    NotReady,
    /// First render pass or panel enable failed
    Display(DisplayError),
}

impl From<DisplayError> for StartupError {
    fn from(err: DisplayError) -> Self {
        StartupError::Display(err)
    }
}

/// Low-level display device
pub trait DisplayDriver {
    /// Device initialised and responding
    fn is_ready(&self) -> bool;

    /// Un-blank the panel
    fn enable_output(&mut self) -> Result<(), DisplayError>;
}

/// Retained-mode rendering engine the rotation drives
///
/// The engine owns the screen contents. `render` only describes what the
/// demo wants on screen; nothing reaches the panel until `service` runs.
pub trait RenderEngine {
    /// Driver behind the engine
    type Driver: DisplayDriver;

    /// Shared access to the driver
    fn driver(&self) -> &Self::Driver;

    /// Exclusive access to the driver
    fn driver_mut(&mut self) -> &mut Self::Driver;

    /// Remove everything the previous demo put on screen
    fn clear_current_surface(&mut self);

    /// Populate the screen for `demo`
    fn render(&mut self, demo: DemoId) -> Result<(), DisplayError>;

    /// Run pending redraws and push them to the panel
    ///
    /// Cheap when nothing changed; called on every dwell tick.
    fn service(&mut self) -> Result<(), DisplayError>;
}

impl<E: RenderEngine + ?Sized> RenderEngine for &mut E {
    type Driver = E::Driver;

    fn driver(&self) -> &Self::Driver {
        (**self).driver()
    }

    fn driver_mut(&mut self) -> &mut Self::Driver {
        (**self).driver_mut()
    }

    fn clear_current_surface(&mut self) {
        (**self).clear_current_surface()
    }

    fn render(&mut self, demo: DemoId) -> Result<(), DisplayError> {
        (**self).render(demo)
    }

    fn service(&mut self) -> Result<(), DisplayError> {
        (**self).service()
    }
}
