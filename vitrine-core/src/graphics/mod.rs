//! Pixel canvases, rasterization primitives and 1-bit bitmaps

pub mod bitmap;
pub mod canvas;
pub mod raster;

pub use bitmap::{BitmapError, BitmapImage, ColorFormat, ImageHeader, SMILEY};
pub use canvas::{checked_index, Canvas, CanvasError, GrayCanvas};
pub use raster::{diagonal_offset, Raster, CORNER_DOT_OFFSETS, SHOWCASE_INSET};
