//! The five demo screens
//!
//! Each demo only populates the scene (and, for the canvas demo, the
//! grayscale canvas). Nothing is drawn until the engine services the scene.

use embedded_graphics::geometry::Point;
use vitrine_core::graphics::{GrayCanvas, Raster, SMILEY};
use vitrine_core::traits::DisplayError;
use vitrine_core::DemoId;

use crate::framebuffer::{HEIGHT, WIDTH};
use crate::scene::{Align, ArcGauge, Font, Scene};

/// Canvas demo width
pub const CANVAS_WIDTH: usize = 80;

/// Canvas demo height
pub const CANVAS_HEIGHT: usize = 48;

/// 8-bit canvas used by the canvas demo (3840 bytes)
pub type DemoCanvas = GrayCanvas<CANVAS_WIDTH, CANVAS_HEIGHT>;

/// Footer shown by the text demo
pub const FOOTER: &str = "Rust + Embassy";

const RIGHT: i32 = WIDTH as i32 - 1;
const BOTTOM: i32 = HEIGHT as i32 - 1;

/// Populate `scene` for `demo`
pub fn populate(demo: DemoId, scene: &mut Scene, canvas: &mut DemoCanvas) -> Result<(), DisplayError> {
    match demo {
        DemoId::Text => text(scene),
        DemoId::Lines => lines(scene),
        DemoId::Arc => arc(scene),
        DemoId::Image => image(scene),
        DemoId::Canvas => canvas_showcase(scene, canvas),
    }
}

fn title(scene: &mut Scene, text: &str) -> Result<(), DisplayError> {
    scene.add_label(text, Font::Small, Align::TopMid, Point::new(0, 2))
}

fn text(scene: &mut Scene) -> Result<(), DisplayError> {
    scene.add_label("SH1106 Demo", Font::Large, Align::TopMid, Point::new(0, 2))?;
    scene.add_label("128x64 OLED", Font::Small, Align::Center, Point::new(0, 4))?;
    scene.add_label(FOOTER, Font::Small, Align::BottomMid, Point::new(0, -2))
}

fn lines(scene: &mut Scene) -> Result<(), DisplayError> {
    // Closed triangle: top centre, bottom left, bottom right
    scene.add_polyline(&[
        Point::new(64, 5),
        Point::new(20, 58),
        Point::new(108, 58),
        Point::new(64, 5),
    ])?;
    scene.add_polyline(&[Point::new(0, 0), Point::new(RIGHT, BOTTOM)])?;
    scene.add_polyline(&[Point::new(RIGHT, 0), Point::new(0, BOTTOM)])
}

fn arc(scene: &mut Scene) -> Result<(), DisplayError> {
    title(scene, "Arc")?;
    scene.add_arc(ArcGauge {
        diameter: 50,
        start_deg: 0,
        sweep_deg: 270,
        percent: 75,
        align: Align::Center,
        offset: Point::new(-20, 6),
    })?;
    scene.add_arc(ArcGauge {
        diameter: 30,
        start_deg: 0,
        sweep_deg: 360,
        percent: 40,
        align: Align::Center,
        offset: Point::new(35, 6),
    })
}

fn image(scene: &mut Scene) -> Result<(), DisplayError> {
    title(scene, "Bitmap")?;
    scene.add_image(SMILEY, Align::Center, Point::new(0, 6))
}

fn canvas_showcase(scene: &mut Scene, canvas: &mut DemoCanvas) -> Result<(), DisplayError> {
    canvas.draw_showcase(DemoCanvas::WHITE, DemoCanvas::BLACK)?;
    scene.add_canvas(Align::Center, Point::zero())
}
