//! Rasterization primitives
//!
//! Everything here reduces to two line fills plus a parametrized loop over
//! [`Canvas::set_pixel`]:
//!
//! - `draw_hline` / `draw_vline` - contiguous runs, endpoint order normalized
//! - `draw_border` / `draw_inset_border` - rectangle outlines
//! - `draw_cross` - both diagonals of a region from one interpolation loop
//! - `draw_corner_dots` - dot clusters mirrored into all four corners
//!
//! Every primitive validates its extent before writing, so a rejected call
//! leaves the canvas untouched.

use super::canvas::{Canvas, CanvasError};

/// Inset of the inner rectangle in the showcase pattern
pub const SHOWCASE_INSET: i32 = 8;

/// Corner dot offsets (applied to both axes) in the showcase pattern
pub const CORNER_DOT_OFFSETS: [i32; 3] = [2, 4, 6];

/// Horizontal offset of row `i` on a diagonal across a `iw` x `ih` region
///
/// Computes `(i * iw) / ih` with truncating division. Monotonic in `i`,
/// zero at `i = 0` and exactly `iw` at `i = ih`.
pub fn diagonal_offset(i: i32, iw: i32, ih: i32) -> Result<i32, CanvasError> {
    if ih <= 0 {
        return Err(CanvasError::EmptyRegion);
    }
    let offset = (i as i64 * iw as i64) / ih as i64;
    Ok(offset as i32)
}

/// Line and shape drawing on top of any [`Canvas`]
pub trait Raster: Canvas {
    /// Fill row `y` from `x1` to `x2` inclusive
    fn draw_hline(&mut self, x1: i32, x2: i32, y: i32, color: Self::Color) -> Result<(), CanvasError> {
        let (start, end) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        self.ensure(start, y)?;
        self.ensure(end, y)?;

        for x in start..=end {
            self.set_pixel(x, y, color)?;
        }
        Ok(())
    }

    /// Fill column `x` from `y1` to `y2` inclusive
    fn draw_vline(&mut self, x: i32, y1: i32, y2: i32, color: Self::Color) -> Result<(), CanvasError> {
        let (start, end) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        self.ensure(x, start)?;
        self.ensure(x, end)?;

        for y in start..=end {
            self.set_pixel(x, y, color)?;
        }
        Ok(())
    }

    /// Rectangle outline through two opposite corners
    fn draw_border(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Self::Color,
    ) -> Result<(), CanvasError> {
        self.ensure(x0, y0)?;
        self.ensure(x1, y1)?;

        self.draw_hline(x0, x1, y0, color)?; // top
        self.draw_hline(x0, x1, y1, color)?; // bottom
        self.draw_vline(x0, y0, y1, color)?; // left
        self.draw_vline(x1, y0, y1, color) // right
    }

    /// Outline `inset` pixels in from every canvas edge
    ///
    /// `inset = 0` traces the canvas edge itself.
    fn draw_inset_border(&mut self, inset: i32, color: Self::Color) -> Result<(), CanvasError> {
        if inset < 0 {
            return Err(CanvasError::EmptyRegion);
        }
        let right = self.width() - 1 - inset;
        let bottom = self.height() - 1 - inset;
        if right < inset || bottom < inset {
            return Err(CanvasError::EmptyRegion);
        }
        self.draw_border(inset, inset, right, bottom, color)
    }

    /// Both diagonals of the `iw` x `ih` region at `(x0, y0)`
    ///
    /// One interpolation per row drives both lines: the falling diagonal at
    /// `x0 + offset` and its mirror at `x0 + iw - 1 - offset`.
    fn draw_cross(
        &mut self,
        x0: i32,
        y0: i32,
        iw: i32,
        ih: i32,
        color: Self::Color,
    ) -> Result<(), CanvasError> {
        if iw <= 0 || ih <= 0 {
            return Err(CanvasError::EmptyRegion);
        }
        self.ensure(x0, y0)?;
        // Saturated corners are past any canvas edge
        self.ensure(x0.saturating_add(iw - 1), y0.saturating_add(ih - 1))?;

        for i in 0..ih {
            let offset = diagonal_offset(i, iw, ih)?;
            let y = y0 + i;
            self.set_pixel(x0 + offset, y, color)?;
            self.set_pixel(x0 + iw - 1 - offset, y, color)?;
        }
        Ok(())
    }

    /// Dot grid `offsets x offsets` mirrored into all four corners
    fn draw_corner_dots(&mut self, offsets: &[i32], color: Self::Color) -> Result<(), CanvasError> {
        for &dy in offsets {
            for &dx in offsets {
                self.ensure(dx, dy)?;
            }
        }

        let right = self.width() - 1;
        let bottom = self.height() - 1;
        for &dy in offsets {
            for &dx in offsets {
                self.set_pixel(dx, dy, color)?; // top-left
                self.set_pixel(right - dx, dy, color)?; // top-right
                self.set_pixel(dx, bottom - dy, color)?; // bottom-left
                self.set_pixel(right - dx, bottom - dy, color)?; // bottom-right
            }
        }
        Ok(())
    }

    /// The full canvas demo pattern
    ///
    /// Black background, edge border, a second border inset by
    /// [`SHOWCASE_INSET`], an X spanning the inside of the inner border and
    /// dots in each corner.
    fn draw_showcase(&mut self, on: Self::Color, off: Self::Color) -> Result<(), CanvasError> {
        let inner = SHOWCASE_INSET + 1;
        let iw = self.width() - 2 * inner;
        let ih = self.height() - 2 * inner;

        self.fill(off);
        self.draw_inset_border(0, on)?;
        self.draw_inset_border(SHOWCASE_INSET, on)?;
        self.draw_cross(inner, inner, iw, ih, on)?;
        self.draw_corner_dots(&CORNER_DOT_OFFSETS, on)
    }
}

impl<C: Canvas + ?Sized> Raster for C {}
