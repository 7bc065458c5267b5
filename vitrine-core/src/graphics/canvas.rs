//! Pixel canvas
//!
//! A canvas is a fixed-size, directly addressable pixel buffer. Every
//! drawing routine in [`super::raster`] is built on [`Canvas::set_pixel`].
//!
//! Out-of-range coordinates are rejected with [`CanvasError::OutOfBounds`]
//! and never touch the buffer.

/// Canvas errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasError {
    /// Coordinate outside `[0, width) x [0, height)`
    OutOfBounds { x: i32, y: i32 },
    /// Region with zero (or negative) width or height
    EmptyRegion,
}

/// Directly addressable pixel buffer
pub trait Canvas {
    /// Pixel value type (luma, on/off, ...)
    type Color: Copy + PartialEq;

    /// Width in pixels
    fn width(&self) -> i32;

    /// Height in pixels
    fn height(&self) -> i32;

    /// Write a single pixel
    fn set_pixel(&mut self, x: i32, y: i32, color: Self::Color) -> Result<(), CanvasError>;

    /// Read a single pixel back
    fn pixel(&self, x: i32, y: i32) -> Result<Self::Color, CanvasError>;

    /// Write `color` to every pixel
    fn fill(&mut self, color: Self::Color);

    /// Check whether a coordinate lies inside the canvas
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    /// Same as [`Canvas::contains`], as a `Result`
    fn ensure(&self, x: i32, y: i32) -> Result<(), CanvasError> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(CanvasError::OutOfBounds { x, y })
        }
    }
}

/// Convert a signed coordinate into buffer indices
///
/// Shared by canvas implementations so they all apply the same policy.
pub fn checked_index(
    x: i32,
    y: i32,
    width: usize,
    height: usize,
) -> Result<(usize, usize), CanvasError> {
    let out_of_bounds = CanvasError::OutOfBounds { x, y };
    let col = usize::try_from(x).map_err(|_| out_of_bounds)?;
    let row = usize::try_from(y).map_err(|_| out_of_bounds)?;
    if col >= width || row >= height {
        return Err(out_of_bounds);
    }
    Ok((col, row))
}

/// 8-bit grayscale canvas (one byte per pixel, row-major)
///
/// `0` is black, `255` is full white. Sized at compile time; the whole
/// buffer lives inline so it can sit in a `static`.
#[derive(Clone)]
pub struct GrayCanvas<const W: usize, const H: usize> {
    rows: [[u8; W]; H],
}

impl<const W: usize, const H: usize> Default for GrayCanvas<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> GrayCanvas<W, H> {
    /// Luma value for a lit pixel
    pub const WHITE: u8 = 0xFF;
    /// Luma value for a dark pixel
    pub const BLACK: u8 = 0x00;

    /// Create a black canvas
    pub const fn new() -> Self {
        Self { rows: [[0; W]; H] }
    }

    /// Raw rows, top to bottom
    pub fn rows(&self) -> &[[u8; W]; H] {
        &self.rows
    }

    /// Number of non-black pixels
    pub fn lit_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&luma| luma != Self::BLACK)
            .count()
    }
}

impl<const W: usize, const H: usize> Canvas for GrayCanvas<W, H> {
    type Color = u8;

    fn width(&self) -> i32 {
        W as i32
    }

    fn height(&self) -> i32 {
        H as i32
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u8) -> Result<(), CanvasError> {
        let (col, row) = checked_index(x, y, W, H)?;
        self.rows[row][col] = color;
        Ok(())
    }

    fn pixel(&self, x: i32, y: i32) -> Result<u8, CanvasError> {
        let (col, row) = checked_index(x, y, W, H)?;
        Ok(self.rows[row][col])
    }

    fn fill(&mut self, color: u8) {
        for row in self.rows.iter_mut() {
            row.fill(color);
        }
    }
}
