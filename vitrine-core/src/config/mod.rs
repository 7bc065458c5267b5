//! Configuration
//!
//! Board-agnostic configuration structures plus a minimal parser for the
//! `showcase.toml` file the firmware embeds at build time.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ConfigError};
pub use types::*;
