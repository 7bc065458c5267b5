//! Framebuffer, widget scene and render engine for Vitrine
//!
//! This crate provides:
//! - [`Framebuffer`]: 128x64 monochrome buffer in SH1106 page layout
//! - [`Scene`]: retained list of widgets (labels, polylines, arcs, images,
//!   the demo canvas) with a dirty flag
//! - [`Engine`]: the `RenderEngine` the rotation drives, generic over a
//!   [`DisplayBackend`]
//! - The five demo screens
//!
//! # Architecture
//!
//! ```text
//! RotationController ──render(demo)──▶ Engine ──populate──▶ Scene
//!                    ──service()────▶ Engine ──draw──▶ Framebuffer ──flush──▶ DisplayBackend
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod demos;
pub mod engine;
pub mod framebuffer;
pub mod scene;

// Re-export key types
pub use backend::DisplayBackend;
pub use demos::{DemoCanvas, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use engine::Engine;
pub use framebuffer::{Framebuffer, HEIGHT, PAGES, WIDTH};
pub use scene::{Align, ArcGauge, Font, Scene, Widget};
pub use vitrine_core::traits::DisplayError;
