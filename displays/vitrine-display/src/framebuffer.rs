//! 1-bit framebuffer in SH1106 page layout
//!
//! The panel is split into 8 pages of 8 rows. Each byte holds one column
//! of a page, least significant bit on top. This is the exact layout the
//! controller expects, so a flush is a straight copy per page.

use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::Pixel;
use vitrine_core::graphics::{checked_index, Canvas, CanvasError};

/// Panel width in pixels
pub const WIDTH: usize = 128;

/// Panel height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;

/// Full-screen monochrome framebuffer
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a blank framebuffer
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Raw page data, top page first
    pub fn pages(&self) -> &[[u8; WIDTH]; PAGES] {
        &self.pages
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    fn is_lit(&self, col: usize, row: usize) -> bool {
        self.pages[row / 8][col] & (1 << (row % 8)) != 0
    }

    fn write(&mut self, col: usize, row: usize, on: bool) {
        let byte = &mut self.pages[row / 8][col];
        let mask = 1 << (row % 8);
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }
}

impl Canvas for Framebuffer {
    type Color = bool;

    fn width(&self) -> i32 {
        WIDTH as i32
    }

    fn height(&self) -> i32 {
        HEIGHT as i32
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), CanvasError> {
        let (col, row) = checked_index(x, y, WIDTH, HEIGHT)?;
        self.write(col, row, on);
        Ok(())
    }

    fn pixel(&self, x: i32, y: i32) -> Result<bool, CanvasError> {
        let (col, row) = checked_index(x, y, WIDTH, HEIGHT)?;
        Ok(self.is_lit(col, row))
    }

    fn fill(&mut self, on: bool) {
        let value = if on { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(value);
        }
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

/// Pixels outside the panel are clipped
impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Ok((col, row)) = checked_index(point.x, point.y, WIDTH, HEIGHT) {
                self.write(col, row, color.is_on());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::geometry::Point;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};
    use proptest::prelude::*;
    use vitrine_core::graphics::Raster;

    #[test]
    fn test_page_layout() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(5, 0, true).unwrap();
        fb.set_pixel(5, 9, true).unwrap();
        fb.set_pixel(127, 63, true).unwrap();

        assert_eq!(fb.pages()[0][5], 0b0000_0001);
        assert_eq!(fb.pages()[1][5], 0b0000_0010);
        assert_eq!(fb.pages()[7][127], 0b1000_0000);
        assert_eq!(fb.lit_count(), 3);
    }

    #[test]
    fn test_set_and_clear_pixel() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(10, 20, true).unwrap();
        assert_eq!(fb.pixel(10, 20), Ok(true));
        fb.set_pixel(10, 20, false).unwrap();
        assert_eq!(fb.pixel(10, 20), Ok(false));
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_canvas_rejects_out_of_bounds() {
        let mut fb = Framebuffer::new();
        assert_eq!(
            fb.set_pixel(128, 0, true),
            Err(CanvasError::OutOfBounds { x: 128, y: 0 })
        );
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_draw_target_clips() {
        let mut fb = Framebuffer::new();
        Line::new(Point::new(-10, 0), Point::new(200, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(fb.lit_count(), WIDTH);
    }

    #[test]
    fn test_raster_on_framebuffer() {
        let mut fb = Framebuffer::new();
        fb.draw_border(0, 0, 127, 63, true).unwrap();
        // 2 * 128 + 2 * 62
        assert_eq!(fb.lit_count(), 380);

        fb.fill(false);
        assert_eq!(fb.lit_count(), 0);
        fb.fill(true);
        assert_eq!(fb.lit_count(), WIDTH * HEIGHT);
    }

    proptest! {
        #[test]
        fn prop_pixel_lands_in_its_page_bit(x in 0i32..128, y in 0i32..64) {
            let mut fb = Framebuffer::new();
            fb.set_pixel(x, y, true).unwrap();

            let page = (y / 8) as usize;
            prop_assert_eq!(fb.pages()[page][x as usize], 1u8 << (y % 8));
            prop_assert_eq!(fb.lit_count(), 1);
        }
    }
}
