//! Simple TOML parser for the showcase configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `showcase.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (integer, boolean)
//! - Decimal and `0x` hexadecimal integers
//! - `[rotation]` and `[display]` section headers
//! - Comments (# ...)
//!
//! Keys that are missing keep their default value.

use super::types::{DisplayHwConfig, RotationConfig, ShowcaseConfig, MAX_COLUMN_OFFSET};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value could not be parsed
    InvalidValue,
    /// Key not valid in its section
    UnknownKey,
    /// Value parsed but outside the allowed range
    OutOfRange,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Rotation,
    Display,
}

/// Parse TOML configuration into a validated [`ShowcaseConfig`]
pub fn parse_config(input: &str) -> Result<ShowcaseConfig, ConfigError> {
    let mut config = ShowcaseConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            match section {
                Section::Rotation => apply_rotation(&mut config.rotation, key, value)?,
                Section::Display => apply_display(&mut config.display, key, value)?,
                Section::Root => return Err(ConfigError::UnknownKey),
            }
        }
    }

    validate(&config)?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    match header.trim() {
        "rotation" => Ok(Section::Rotation),
        "display" => Ok(Section::Display),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn apply_rotation(rotation: &mut RotationConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "dwell_ms" => rotation.dwell_ms = parse_int(value)?,
        "tick_ms" => rotation.tick_ms = parse_int(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn apply_display(display: &mut DisplayHwConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "i2c_address" => display.i2c_address = parse_int(value)?,
        "column_offset" => display.column_offset = parse_int(value)?,
        "contrast" => display.contrast = parse_int(value)?,
        "inverted" => display.inverted = parse_bool(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn validate(config: &ShowcaseConfig) -> Result<(), ConfigError> {
    let rotation = &config.rotation;
    if rotation.tick_ms == 0 || rotation.dwell_ms == 0 || rotation.tick_ms > rotation.dwell_ms {
        return Err(ConfigError::OutOfRange);
    }

    let display = &config.display;
    if display.i2c_address > 0x7F || display.column_offset > MAX_COLUMN_OFFSET {
        return Err(ConfigError::OutOfRange);
    }

    Ok(())
}

/// Split `key = value`, dropping any trailing comment
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        Some(hash_pos) => value[..hash_pos].trim(),
        None => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a decimal or `0x`-prefixed hexadecimal integer
///
/// Values that parse but do not fit `T` are reported as `OutOfRange`.
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ConfigError> {
    let wide = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    }
    .map_err(|_| ConfigError::InvalidValue)?;

    T::try_from(wide).map_err(|_| ConfigError::OutOfRange)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}
