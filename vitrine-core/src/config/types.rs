//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default time each demo stays on screen
pub const DEFAULT_DWELL_MS: u32 = 2000;

/// Default render service interval
pub const DEFAULT_TICK_MS: u32 = 30;

/// Default SH1106 I2C address
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// SH1106 RAM is 132 columns wide; the 128 visible ones start here
pub const DEFAULT_COLUMN_OFFSET: u8 = 2;

/// Largest usable column offset (132 - 128)
pub const MAX_COLUMN_OFFSET: u8 = 4;

/// Demo rotation timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotationConfig {
    /// Time each demo is held on screen (ms)
    pub dwell_ms: u32,
    /// Sleep between render service calls (ms)
    pub tick_ms: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            dwell_ms: DEFAULT_DWELL_MS,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl RotationConfig {
    /// Tick length the rotation loop actually sleeps for, at least 1 ms
    pub const fn effective_tick_ms(&self) -> u32 {
        if self.tick_ms == 0 {
            1
        } else {
            self.tick_ms
        }
    }

    /// Number of service ticks per dwell period
    ///
    /// Rounds up: the last tick may overshoot the dwell slightly. A demo is
    /// always held for at least one tick.
    pub const fn ticks_per_dwell(&self) -> u32 {
        let ticks = self.dwell_ms.div_ceil(self.effective_tick_ms());
        if ticks == 0 {
            1
        } else {
            ticks
        }
    }
}

/// SH1106 panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayHwConfig {
    /// 7-bit I2C address
    pub i2c_address: u8,
    /// First visible RAM column
    pub column_offset: u8,
    /// Contrast (0-255)
    pub contrast: u8,
    /// Invert all pixels
    pub inverted: bool,
}

impl Default for DisplayHwConfig {
    fn default() -> Self {
        Self {
            i2c_address: DEFAULT_I2C_ADDRESS,
            column_offset: DEFAULT_COLUMN_OFFSET,
            contrast: 0xCF,
            inverted: false,
        }
    }
}

/// Complete firmware configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShowcaseConfig {
    /// Rotation timing
    pub rotation: RotationConfig,
    /// Panel settings
    pub display: DisplayHwConfig,
}
