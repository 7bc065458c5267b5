//! SH1106 OLED Display Driver
//!
//! Driver for 128x64 SH1106-based OLED displays via I2C.
//!
//! The controller has 132 columns of RAM; the visible 128 start at a
//! board-specific offset (2 on most modules). Frames are written one page
//! (8 rows) at a time.

use vitrine_core::config::DisplayHwConfig;
use vitrine_core::traits::{DisplayDriver, DisplayError};
use vitrine_display::{DisplayBackend, Framebuffer, WIDTH};
use vitrine_hal::I2cBus;

/// SH1106 I2C address (typically 0x3C or 0x3D)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte: the following byte is a command
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte: the following bytes are display RAM data
const CONTROL_DATA: u8 = 0x40;

/// SH1106 commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SH1106 OLED driver
pub struct Sh1106<I> {
    i2c: I,
    address: u8,
    column_offset: u8,
    contrast: u8,
    inverted: bool,
    initialized: bool,
}

impl<I: I2cBus> Sh1106<I> {
    /// Create a driver with the default address, offset and contrast
    pub fn new(i2c: I) -> Self {
        Self::with_config(i2c, &DisplayHwConfig::default())
    }

    /// Create a driver from panel configuration
    pub fn with_config(i2c: I, config: &DisplayHwConfig) -> Self {
        Self {
            i2c,
            address: config.i2c_address,
            column_offset: config.column_offset,
            contrast: config.contrast,
            inverted: config.inverted,
            initialized: false,
        }
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }

    /// Initialize the display
    ///
    /// The panel is left blanked; [`DisplayDriver::enable_output`] turns it
    /// on once the first frame has been written.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.initialized = false;

        let init_cmds: [u8; 21] = [
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14,                  // Enable charge pump
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            self.contrast,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            if self.inverted {
                cmd::SET_INVERSE
            } else {
                cmd::SET_NORMAL
            },
        ];

        for &c in init_cmds.iter() {
            self.command(c)?;
        }

        self.initialized = true;
        Ok(())
    }

    /// Send a command to the display
    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, c])
            .map_err(|_| DisplayError::Communication)
    }

    fn ensure_initialized(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)?;
        self.contrast = contrast;
        Ok(())
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.command(if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        })?;
        self.inverted = inverted;
        Ok(())
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.command(if on {
            cmd::DISPLAY_ON
        } else {
            cmd::DISPLAY_OFF
        })
    }
}

impl<I: I2cBus> DisplayDriver for Sh1106<I> {
    fn is_ready(&self) -> bool {
        self.initialized
    }

    fn enable_output(&mut self) -> Result<(), DisplayError> {
        self.set_display_on(true)
    }
}

impl<I: I2cBus> DisplayBackend for Sh1106<I> {
    fn flush(&mut self, framebuffer: &Framebuffer) -> Result<(), DisplayError> {
        self.ensure_initialized()?;

        for (page, columns) in framebuffer.pages().iter().enumerate() {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN | (self.column_offset & 0x0F))?;
            self.command(cmd::SET_HIGH_COLUMN | (self.column_offset >> 4))?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(columns);
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }

        Ok(())
    }
}
