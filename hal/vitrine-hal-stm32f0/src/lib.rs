//! STM32F0-specific HAL for the Vitrine firmware
//!
//! This crate implements the `vitrine-hal` traits on top of embassy-stm32
//! for STM32F0 parts with enough RAM for a full 128x64 frame plus the
//! grayscale demo canvas:
//!
//! - STM32F072RB (Nucleo-F072RB)
//! - STM32F072CB
//!
//! # Features
//!
//! - `stm32f072rb`, `stm32f072cb` - chip selection, pick one in the firmware
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod i2c;

pub use i2c::{BlockingI2c, I2cBusError};
