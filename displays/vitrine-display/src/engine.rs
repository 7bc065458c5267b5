//! Retained-mode render engine
//!
//! Owns the scene, the framebuffer, the demo canvas and the backend.
//! `render` only edits the scene; `service` turns a dirty scene into
//! pixels and flushes them.

use vitrine_core::traits::{DisplayError, RenderEngine};
use vitrine_core::DemoId;

use crate::backend::DisplayBackend;
use crate::demos::{self, DemoCanvas};
use crate::framebuffer::Framebuffer;
use crate::scene::Scene;

/// Render engine over a [`DisplayBackend`]
pub struct Engine<B> {
    backend: B,
    framebuffer: Framebuffer,
    scene: Scene,
    canvas: DemoCanvas,
}

impl<B: DisplayBackend> Engine<B> {
    /// Create an engine with an empty, dirty scene
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            framebuffer: Framebuffer::new(),
            scene: Scene::new(),
            canvas: DemoCanvas::new(),
        }
    }

    /// Backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Last rendered frame
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Canvas demo surface
    pub fn canvas(&self) -> &DemoCanvas {
        &self.canvas
    }

    fn redraw(&mut self) {
        self.framebuffer.clear();
        match self.scene.draw(&mut self.framebuffer, &self.canvas) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}

impl<B: DisplayBackend> RenderEngine for Engine<B> {
    type Driver = B;

    fn driver(&self) -> &B {
        &self.backend
    }

    fn driver_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn clear_current_surface(&mut self) {
        self.scene.clear();
    }

    fn render(&mut self, demo: DemoId) -> Result<(), DisplayError> {
        demos::populate(demo, &mut self.scene, &mut self.canvas)
    }

    fn service(&mut self) -> Result<(), DisplayError> {
        if !self.scene.is_dirty() {
            return Ok(());
        }

        self.redraw();
        self.backend.flush(&self.framebuffer)?;
        self.scene.mark_clean();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::graphics::{Canvas, SMILEY};
    use vitrine_core::traits::DisplayDriver;

    struct MockBackend {
        ready: bool,
        flushes: usize,
        fail: bool,
        last: Framebuffer,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                ready: true,
                flushes: 0,
                fail: false,
                last: Framebuffer::new(),
            }
        }
    }

    impl DisplayDriver for MockBackend {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn enable_output(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    impl DisplayBackend for MockBackend {
        fn flush(&mut self, framebuffer: &Framebuffer) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.flushes += 1;
            self.last = framebuffer.clone();
            Ok(())
        }
    }

    fn shown(demo: DemoId) -> Engine<MockBackend> {
        let mut engine = Engine::new(MockBackend::new());
        engine.clear_current_surface();
        engine.render(demo).unwrap();
        engine.service().unwrap();
        engine
    }

    #[test]
    fn test_service_flushes_only_when_dirty() {
        let mut engine = Engine::new(MockBackend::new());
        engine.service().unwrap();
        assert_eq!(engine.backend().flushes, 1);

        for _ in 0..10 {
            engine.service().unwrap();
        }
        assert_eq!(engine.backend().flushes, 1);

        engine.render(DemoId::Text).unwrap();
        engine.service().unwrap();
        assert_eq!(engine.backend().flushes, 2);
    }

    #[test]
    fn test_failed_flush_stays_dirty() {
        let mut engine = Engine::new(MockBackend::new());
        engine.backend.fail = true;
        assert_eq!(engine.service(), Err(DisplayError::Communication));
        assert!(engine.scene().is_dirty());

        engine.backend.fail = false;
        engine.service().unwrap();
        assert!(!engine.scene().is_dirty());
    }

    #[test]
    fn test_clear_blanks_next_frame() {
        let mut engine = shown(DemoId::Lines);
        assert!(engine.framebuffer().lit_count() > 0);

        engine.clear_current_surface();
        engine.service().unwrap();
        assert_eq!(engine.backend().last.lit_count(), 0);
    }

    #[test]
    fn test_text_demo_frame() {
        let engine = shown(DemoId::Text);
        let fb = &engine.backend().last;
        assert!(fb.lit_count() > 0);

        // Title is pushed 2 px down from the top edge
        for x in 0..128 {
            assert_eq!(fb.pixel(x, 0), Ok(false));
            assert_eq!(fb.pixel(x, 1), Ok(false));
        }
    }

    #[test]
    fn test_lines_demo_frame() {
        let engine = shown(DemoId::Lines);
        let fb = &engine.backend().last;
        for (x, y) in [(0, 0), (127, 63), (127, 0), (0, 63), (64, 5), (20, 58), (108, 58)] {
            assert_eq!(fb.pixel(x, y), Ok(true), "({}, {})", x, y);
        }
        // Triangle base
        assert_eq!(fb.pixel(64, 58), Ok(true));
    }

    #[test]
    fn test_image_demo_frame() {
        let engine = shown(DemoId::Image);
        let fb = engine.framebuffer();
        for (px, py) in SMILEY.opaque_pixels() {
            assert_eq!(fb.pixel(48 + px as i32, 22 + py as i32), Ok(true));
        }
        // Eye hole
        assert_eq!(fb.pixel(48 + 8, 22 + 10), Ok(false));
    }

    #[test]
    fn test_canvas_demo_frame() {
        let engine = shown(DemoId::Canvas);
        let fb = engine.framebuffer();

        // Canvas sits centred at (24, 8)
        assert_eq!(fb.pixel(24, 8), Ok(true));
        assert_eq!(fb.pixel(103, 55), Ok(true));
        assert_eq!(fb.pixel(24 + 8, 8 + 8), Ok(true));
        assert_eq!(fb.pixel(24 + 2, 8 + 2), Ok(true));
        assert_eq!(fb.pixel(24 + 1, 8 + 1), Ok(false));
        assert_eq!(fb.pixel(23, 8), Ok(false));

        // Every lit canvas pixel made it to the frame
        assert_eq!(fb.lit_count(), engine.canvas().lit_count());
    }

    #[test]
    fn test_arc_demo_frame() {
        let engine = shown(DemoId::Arc);
        assert_eq!(engine.scene().len(), 3);
        assert!(engine.framebuffer().lit_count() > 0);
    }
}
