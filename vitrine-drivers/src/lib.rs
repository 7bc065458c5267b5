//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the display traits
//! defined in vitrine-core and vitrine-display:
//!
//! - SH1106 128x64 OLED over I2C

#![no_std]
#![deny(unsafe_code)]

pub mod display;
