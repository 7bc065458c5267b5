//! Packed 1-bit bitmaps
//!
//! A bitmap is an immutable byte array plus an [`ImageHeader`]. Rows are
//! stored top to bottom, `stride` bytes each; within a byte the most
//! significant bit is the leftmost pixel. A set bit is opaque, a clear bit
//! is transparent.

/// Pixel format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorFormat {
    /// 1-bit alpha, MSB first
    A1,
}

/// Bitmap header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageHeader {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Bytes per row
    pub stride: u16,
    /// Pixel format
    pub format: ColorFormat,
}

/// Bitmap validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapError {
    /// Stride cannot hold `width` bits
    StrideTooSmall,
    /// Fewer than `stride * height` data bytes
    DataTooShort,
}

/// Read-only view of a packed bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapImage<'a> {
    header: ImageHeader,
    data: &'a [u8],
}

impl<'a> BitmapImage<'a> {
    /// Validate `header` against `data` and wrap them
    pub const fn new(header: ImageHeader, data: &'a [u8]) -> Result<Self, BitmapError> {
        let min_stride = (header.width as usize + 7) / 8;
        if (header.stride as usize) < min_stride {
            return Err(BitmapError::StrideTooSmall);
        }
        if data.len() < header.stride as usize * header.height as usize {
            return Err(BitmapError::DataTooShort);
        }
        Ok(Self { header, data })
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.header.width as u32
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.header.height as u32
    }

    /// Opacity of pixel `(px, py)`, `None` outside the image
    pub fn is_opaque(&self, px: u32, py: u32) -> Option<bool> {
        if px >= self.width() || py >= self.height() {
            return None;
        }
        let index = self.header.stride as usize * py as usize + px as usize / 8;
        let byte = *self.data.get(index)?;
        Some((byte >> (7 - px % 8)) & 1 == 1)
    }

    /// All opaque pixel coordinates, row-major
    pub fn opaque_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let (width, height) = (self.width(), self.height());
        (0..height)
            .flat_map(move |py| (0..width).map(move |px| (px, py)))
            .filter(move |&(px, py)| self.is_opaque(px, py) == Some(true))
    }
}

#[cfg(feature = "embedded-graphics")]
mod eg {
    use embedded_graphics_core::draw_target::DrawTarget;
    use embedded_graphics_core::geometry::{OriginDimensions, Point, Size};
    use embedded_graphics_core::image::ImageDrawable;
    use embedded_graphics_core::pixelcolor::BinaryColor;
    use embedded_graphics_core::primitives::Rectangle;
    use embedded_graphics_core::Pixel;

    use super::BitmapImage;

    impl OriginDimensions for BitmapImage<'_> {
        fn size(&self) -> Size {
            Size::new(self.width(), self.height())
        }
    }

    /// Opaque bits draw as `On`; transparent bits are skipped
    impl ImageDrawable for BitmapImage<'_> {
        type Color = BinaryColor;

        fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
        where
            D: DrawTarget<Color = BinaryColor>,
        {
            target.draw_iter(
                self.opaque_pixels()
                    .map(|(px, py)| Pixel(Point::new(px as i32, py as i32), BinaryColor::On)),
            )
        }

        fn draw_sub_image<D>(&self, target: &mut D, area: &Rectangle) -> Result<(), D::Error>
        where
            D: DrawTarget<Color = BinaryColor>,
        {
            let left = area.top_left.x;
            let top = area.top_left.y;
            let right = left + area.size.width as i32;
            let bottom = top + area.size.height as i32;

            target.draw_iter(
                self.opaque_pixels()
                    .map(|(px, py)| Point::new(px as i32, py as i32))
                    .filter(|p| p.x >= left && p.x < right && p.y >= top && p.y < bottom)
                    .map(|p| Pixel(Point::new(p.x - left, p.y - top), BinaryColor::On)),
            )
        }
    }
}

/// 32x32 smiley face, 4 bytes per row
const SMILEY_DATA: [u8; 128] = [
    0x00, 0x03, 0xC0, 0x00, // top of circle
    0x00, 0x1F, 0xF8, 0x00, //
    0x00, 0x7F, 0xFE, 0x00, //
    0x00, 0xFF, 0xFF, 0x00, //
    0x01, 0xFF, 0xFF, 0x80, //
    0x03, 0xFF, 0xFF, 0xC0, //
    0x07, 0xFF, 0xFF, 0xE0, //
    0x0F, 0xFF, 0xFF, 0xF0, //
    0x0F, 0xFF, 0xFF, 0xF0, //
    0x1F, 0x9F, 0xF9, 0xF8, // eyes
    0x1F, 0x0F, 0xF0, 0xF8, //
    0x3F, 0x0F, 0xF0, 0xFC, //
    0x3F, 0x0F, 0xF0, 0xFC, //
    0x3F, 0x9F, 0xF9, 0xFC, //
    0x3F, 0xFF, 0xFF, 0xFC, //
    0x3F, 0xFF, 0xFF, 0xFC, //
    0x3F, 0xFF, 0xFF, 0xFC, //
    0x3F, 0xFF, 0xFF, 0xFC, //
    0x3F, 0xFF, 0xFF, 0xFC, //
    0x3E, 0xFF, 0xFF, 0x7C, // mouth
    0x1E, 0x7F, 0xFE, 0x78, //
    0x1F, 0x3F, 0xFC, 0xF8, //
    0x0F, 0x9F, 0xF9, 0xF0, //
    0x0F, 0xC0, 0x03, 0xF0, //
    0x07, 0xF0, 0x0F, 0xE0, //
    0x03, 0xFF, 0xFF, 0xC0, //
    0x01, 0xFF, 0xFF, 0x80, //
    0x00, 0xFF, 0xFF, 0x00, //
    0x00, 0x7F, 0xFE, 0x00, //
    0x00, 0x1F, 0xF8, 0x00, //
    0x00, 0x03, 0xC0, 0x00, // bottom of circle
    0x00, 0x00, 0x00, 0x00, //
];

/// Smiley bitmap shown by the image demo
pub const SMILEY: BitmapImage<'static> = match BitmapImage::new(
    ImageHeader {
        width: 32,
        height: 32,
        stride: 4,
        format: ColorFormat::A1,
    },
    &SMILEY_DATA,
) {
    Ok(image) => image,
    Err(_) => panic!("smiley header does not match its data"),
};

#[cfg(test)]
mod tests {
    use super::*;

    const fn header(width: u16, height: u16, stride: u16) -> ImageHeader {
        ImageHeader {
            width,
            height,
            stride,
            format: ColorFormat::A1,
        }
    }

    #[test]
    fn test_stride_validation() {
        let data = [0u8; 16];
        assert_eq!(
            BitmapImage::new(header(9, 2, 1), &data),
            Err(BitmapError::StrideTooSmall)
        );
        assert!(BitmapImage::new(header(9, 2, 2), &data).is_ok());
        // Padding bytes beyond the minimum stride are allowed
        assert!(BitmapImage::new(header(9, 2, 8), &data).is_ok());
        assert_eq!(
            BitmapImage::new(header(9, 3, 8), &data),
            Err(BitmapError::DataTooShort)
        );
    }

    #[test]
    fn test_msb_first() {
        let data = [0b1011_0000];
        let image = BitmapImage::new(header(8, 1, 1), &data).unwrap();

        let row: [bool; 8] = core::array::from_fn(|px| image.is_opaque(px as u32, 0).unwrap());
        assert_eq!(row, [true, false, true, true, false, false, false, false]);
    }

    #[test]
    fn test_stride_padding_is_skipped() {
        // Width 4, stride 2: the second byte of each row is padding
        let data = [0b1000_0000, 0xFF, 0b0001_0000, 0xFF];
        let image = BitmapImage::new(header(4, 2, 2), &data).unwrap();

        assert_eq!(image.is_opaque(0, 0), Some(true));
        assert_eq!(image.is_opaque(3, 0), Some(false));
        assert_eq!(image.is_opaque(3, 1), Some(true));
        assert_eq!(image.is_opaque(4, 0), None);
        assert_eq!(image.opaque_pixels().count(), 2);
    }

    #[test]
    fn test_smiley_matches_reference_bits() {
        assert_eq!(SMILEY.width(), 32);
        assert_eq!(SMILEY.height(), 32);

        for py in 0..32u32 {
            let word = u32::from_be_bytes([
                SMILEY_DATA[py as usize * 4],
                SMILEY_DATA[py as usize * 4 + 1],
                SMILEY_DATA[py as usize * 4 + 2],
                SMILEY_DATA[py as usize * 4 + 3],
            ]);
            for px in 0..32u32 {
                let expected = (word >> (31 - px)) & 1 == 1;
                assert_eq!(SMILEY.is_opaque(px, py), Some(expected), "pixel ({}, {})", px, py);
            }
        }
    }

    #[test]
    fn test_smiley_landmarks() {
        // Top of the circle: 4 pixels centred on row 0
        assert_eq!(SMILEY.is_opaque(13, 0), Some(false));
        assert_eq!(SMILEY.is_opaque(14, 0), Some(true));
        assert_eq!(SMILEY.is_opaque(17, 0), Some(true));
        assert_eq!(SMILEY.is_opaque(18, 0), Some(false));

        // Eye holes on row 10
        assert_eq!(SMILEY.is_opaque(8, 10), Some(false));
        assert_eq!(SMILEY.is_opaque(7, 10), Some(true));

        // Last row is empty
        assert!((0..32).all(|px| SMILEY.is_opaque(px, 31) == Some(false)));
    }
}
