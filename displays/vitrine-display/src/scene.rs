//! Retained widget scene
//!
//! A scene is the list of widgets currently on screen plus a dirty flag.
//! Demos only add widgets; the engine redraws the whole scene into the
//! framebuffer when it is dirty.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Angle, Dimensions, Point, Size};
use embedded_graphics::image::Image;
use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_7X14};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{Arc, Polyline, Primitive, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};
use heapless::{String, Vec};
use vitrine_core::graphics::{BitmapImage, Canvas};
use vitrine_core::traits::DisplayError;

use crate::demos::DemoCanvas;
use crate::framebuffer::{HEIGHT, WIDTH};

/// Maximum widgets on screen at once
pub const MAX_WIDGETS: usize = 8;

/// Maximum label length in characters
pub const MAX_LABEL_LEN: usize = 24;

/// Maximum vertices per polyline
pub const MAX_POLYLINE_POINTS: usize = 8;

/// Arc indicator stroke width
const ARC_INDICATOR_WIDTH: u32 = 3;

/// Label font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// 7x14 titles
    Large,
    /// 5x8 body text
    Small,
}

impl Font {
    fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Font::Large => &FONT_7X14,
            Font::Small => &FONT_5X8,
        }
    }
}

/// Anchor point on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    /// Horizontally centred, touching the top edge
    TopMid,
    /// Centred on both axes
    Center,
    /// Horizontally centred, touching the bottom edge
    BottomMid,
}

impl Align {
    /// Top-left corner of an object of `size` anchored here, then shifted
    /// by `offset`
    pub fn resolve(self, size: Size, offset: Point) -> Point {
        let (w, h) = (size.width as i32, size.height as i32);
        let x = (WIDTH as i32 - w) / 2;
        let y = match self {
            Align::TopMid => 0,
            Align::Center => (HEIGHT as i32 - h) / 2,
            Align::BottomMid => HEIGHT as i32 - h,
        };
        Point::new(x, y) + offset
    }
}

/// Arc gauge: thin background track with a thick value indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcGauge {
    /// Outer diameter in pixels
    pub diameter: u32,
    /// Track start angle (degrees, 0 = 3 o'clock)
    pub start_deg: i16,
    /// Track length (degrees)
    pub sweep_deg: i16,
    /// Filled share of the track in percent
    pub percent: u8,
    pub align: Align,
    pub offset: Point,
}

impl ArcGauge {
    /// Angle covered by the indicator
    pub fn indicator_sweep_deg(&self) -> i32 {
        self.sweep_deg as i32 * self.percent.min(100) as i32 / 100
    }
}

/// Single on-screen element
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Label {
        text: String<MAX_LABEL_LEN>,
        font: Font,
        align: Align,
        offset: Point,
    },
    Polyline {
        points: Vec<Point, MAX_POLYLINE_POINTS>,
    },
    Arc(ArcGauge),
    Image {
        bitmap: BitmapImage<'static>,
        align: Align,
        offset: Point,
    },
    /// The engine's grayscale demo canvas; non-black pixels are lit
    Canvas { align: Align, offset: Point },
}

impl Widget {
    /// Draw onto `target`, sourcing canvas pixels from `canvas`
    pub fn draw<D>(&self, target: &mut D, canvas: &DemoCanvas) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        match self {
            Widget::Label {
                text,
                font,
                align,
                offset,
            } => {
                let style = MonoTextStyle::new(font.mono(), BinaryColor::On);
                let size = Text::with_baseline(text, Point::zero(), style, Baseline::Top)
                    .bounding_box()
                    .size;
                let top_left = align.resolve(size, *offset);
                Text::with_baseline(text, top_left, style, Baseline::Top).draw(target)?;
            }
            Widget::Polyline { points } => {
                Polyline::new(points)
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                    .draw(target)?;
            }
            Widget::Arc(gauge) => {
                let size = Size::new(gauge.diameter, gauge.diameter);
                let top_left = gauge.align.resolve(size, gauge.offset);
                let start = Angle::from_degrees(gauge.start_deg as f32);

                Arc::new(top_left, gauge.diameter, start, Angle::from_degrees(gauge.sweep_deg as f32))
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                    .draw(target)?;

                let sweep = gauge.indicator_sweep_deg();
                if sweep > 0 {
                    // Keep the thick stroke inside the widget box
                    let inset = ARC_INDICATOR_WIDTH / 2;
                    Arc::new(
                        top_left + Point::new(inset as i32, inset as i32),
                        gauge.diameter.saturating_sub(2 * inset),
                        start,
                        Angle::from_degrees(sweep as f32),
                    )
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, ARC_INDICATOR_WIDTH))
                    .draw(target)?;
                }
            }
            Widget::Image {
                bitmap,
                align,
                offset,
            } => {
                let size = Size::new(bitmap.width(), bitmap.height());
                Image::new(bitmap, align.resolve(size, *offset)).draw(target)?;
            }
            Widget::Canvas { align, offset } => {
                let size = Size::new(canvas.width() as u32, canvas.height() as u32);
                let top_left = align.resolve(size, *offset);
                target.draw_iter(canvas.rows().iter().enumerate().flat_map(|(y, row)| {
                    row.iter().enumerate().map(move |(x, &luma)| {
                        Pixel(
                            top_left + Point::new(x as i32, y as i32),
                            BinaryColor::from(luma != DemoCanvas::BLACK),
                        )
                    })
                }))?;
            }
        }
        Ok(())
    }
}

/// Widgets currently on screen
#[derive(Debug, Clone)]
pub struct Scene {
    widgets: Vec<Widget, MAX_WIDGETS>,
    /// Whether the scene needs to be redrawn
    dirty: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene
    pub const fn new() -> Self {
        Self {
            widgets: Vec::new(),
            dirty: true,
        }
    }

    /// Remove every widget
    pub fn clear(&mut self) {
        self.widgets.clear();
        self.dirty = true;
    }

    /// Add a text label, truncated to [`MAX_LABEL_LEN`] characters
    pub fn add_label(
        &mut self,
        text: &str,
        font: Font,
        align: Align,
        offset: Point,
    ) -> Result<(), DisplayError> {
        let mut label = String::new();
        for ch in text.chars().take(MAX_LABEL_LEN) {
            if label.push(ch).is_err() {
                break;
            }
        }
        self.push(Widget::Label {
            text: label,
            font,
            align,
            offset,
        })
    }

    /// Add a 1 px polyline through `points` in screen coordinates
    pub fn add_polyline(&mut self, points: &[Point]) -> Result<(), DisplayError> {
        let points = Vec::from_slice(points).map_err(|_| DisplayError::SceneFull)?;
        self.push(Widget::Polyline { points })
    }

    /// Add an arc gauge
    pub fn add_arc(&mut self, gauge: ArcGauge) -> Result<(), DisplayError> {
        self.push(Widget::Arc(gauge))
    }

    /// Add a bitmap image
    pub fn add_image(
        &mut self,
        bitmap: BitmapImage<'static>,
        align: Align,
        offset: Point,
    ) -> Result<(), DisplayError> {
        self.push(Widget::Image {
            bitmap,
            align,
            offset,
        })
    }

    /// Show the engine's demo canvas
    pub fn add_canvas(&mut self, align: Align, offset: Point) -> Result<(), DisplayError> {
        self.push(Widget::Canvas { align, offset })
    }

    fn push(&mut self, widget: Widget) -> Result<(), DisplayError> {
        self.widgets
            .push(widget)
            .map_err(|_| DisplayError::SceneFull)?;
        self.dirty = true;
        Ok(())
    }

    /// Widgets in draw order
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Number of widgets
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Check if the scene is empty
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Check if scene needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark scene as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Draw every widget in order
    pub fn draw<D>(&self, target: &mut D, canvas: &DemoCanvas) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for widget in &self.widgets {
            widget.draw(target, canvas)?;
        }
        Ok(())
    }
}
