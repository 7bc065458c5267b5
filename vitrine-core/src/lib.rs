//! Board-agnostic core logic for the Vitrine OLED demo firmware
//!
//! This crate contains everything that does not depend on a specific
//! display controller or MCU:
//!
//! - Pixel canvases and rasterization primitives
//! - The packed 1-bit bitmap adapter
//! - The demo table and the rotation scheduler
//! - Collaborator traits (render engine, display driver)
//! - Configuration types and the embedded config parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod demo;
pub mod graphics;
pub mod scheduler;
pub mod traits;

pub use demo::{DemoId, DEMOS, DEMO_COUNT};
