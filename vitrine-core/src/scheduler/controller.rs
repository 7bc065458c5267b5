//! Rotation main loop
//!
//! Each cycle clears the screen, renders the current demo, forces one
//! render pass, then sleeps in `tick_ms` steps until the dwell runs out,
//! servicing the engine on every step. Display errors after startup do not
//! stop the loop; they are reported and the next demo is shown.

use embedded_hal::delay::DelayNs;

use super::rotation::Rotation;
use crate::config::RotationConfig;
use crate::demo::DemoId;
use crate::traits::{DisplayDriver, DisplayError, RenderEngine, StartupError};

/// Progress notification from [`RotationController::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleReport {
    /// A demo is about to be shown
    Showing {
        /// One-based position in the table
        position: usize,
        /// Table length
        count: usize,
        demo: DemoId,
    },
    /// A cycle finished with a display error
    Fault { demo: DemoId, error: DisplayError },
}

/// Owns the engine, the delay source and the rotation state
pub struct RotationController<E, D> {
    engine: E,
    delay: D,
    rotation: Rotation,
    tick_ms: u32,
}

impl<E: RenderEngine, D: DelayNs> RotationController<E, D> {
    /// Check the display and bring it up
    ///
    /// Fails with [`StartupError::NotReady`] without touching the engine
    /// when the driver is not ready. Otherwise runs one render pass and
    /// un-blanks the panel.
    pub fn start(mut engine: E, delay: D, config: &RotationConfig) -> Result<Self, StartupError> {
        if !engine.driver().is_ready() {
            return Err(StartupError::NotReady);
        }

        engine.service()?;
        engine.driver_mut().enable_output()?;

        Ok(Self {
            engine,
            delay,
            rotation: Rotation::new(config),
            tick_ms: config.effective_tick_ms(),
        })
    }

    /// Rotation state
    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Demo on screen
    pub fn current(&self) -> DemoId {
        self.rotation.current()
    }

    /// Replace the screen with the current demo and push it out
    pub fn show_current(&mut self) -> Result<(), DisplayError> {
        self.engine.clear_current_surface();
        self.engine.render(self.rotation.current())?;
        self.engine.service()
    }

    /// Hold the current demo for one dwell period, then advance
    ///
    /// Always advances, even if a service call failed; the first error
    /// seen is returned.
    pub fn dwell(&mut self) -> Result<DemoId, DisplayError> {
        let mut fault = None;

        loop {
            if let Err(err) = self.engine.service() {
                fault.get_or_insert(err);
            }
            self.delay.delay_ms(self.tick_ms);

            if let Some(next) = self.rotation.tick(self.tick_ms) {
                return match fault {
                    Some(err) => Err(err),
                    None => Ok(next),
                };
            }
        }
    }

    /// Show the current demo for one full dwell period
    ///
    /// Returns the demo that comes next.
    pub fn run_cycle(&mut self) -> Result<DemoId, DisplayError> {
        let shown = self.show_current();
        let next = self.dwell();
        shown?;
        next
    }

    /// Rotate forever
    pub fn run<F: FnMut(&CycleReport)>(&mut self, mut report: F) -> ! {
        loop {
            let demo = self.rotation.current();
            report(&CycleReport::Showing {
                position: self.rotation.position(),
                count: self.rotation.len(),
                demo,
            });

            if let Err(error) = self.run_cycle() {
                report(&CycleReport::Fault { demo, error });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{DEMOS, DEMO_COUNT};
    use crate::graphics::CanvasError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Clear,
        Render(DemoId),
        Service,
    }

    const MAX_OPS: usize = 512;

    struct MockDriver {
        ready: bool,
        enabled: bool,
    }

    impl DisplayDriver for MockDriver {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn enable_output(&mut self) -> Result<(), DisplayError> {
            self.enabled = true;
            Ok(())
        }
    }

    struct MockEngine {
        driver: MockDriver,
        ops: [Op; MAX_OPS],
        len: usize,
        fail_render: Option<DemoId>,
        fail_services: usize,
    }

    impl MockEngine {
        fn new(ready: bool) -> Self {
            Self {
                driver: MockDriver {
                    ready,
                    enabled: false,
                },
                ops: [Op::Clear; MAX_OPS],
                len: 0,
                fail_render: None,
                fail_services: 0,
            }
        }

        fn record(&mut self, op: Op) {
            if self.len < MAX_OPS {
                self.ops[self.len] = op;
                self.len += 1;
            }
        }

        fn ops(&self) -> &[Op] {
            &self.ops[..self.len]
        }

        fn count(&self, op: Op) -> usize {
            self.ops().iter().filter(|&&o| o == op).count()
        }
    }

    impl RenderEngine for MockEngine {
        type Driver = MockDriver;

        fn driver(&self) -> &MockDriver {
            &self.driver
        }

        fn driver_mut(&mut self) -> &mut MockDriver {
            &mut self.driver
        }

        fn clear_current_surface(&mut self) {
            self.record(Op::Clear);
        }

        fn render(&mut self, demo: DemoId) -> Result<(), DisplayError> {
            self.record(Op::Render(demo));
            if self.fail_render == Some(demo) {
                return Err(CanvasError::EmptyRegion.into());
            }
            Ok(())
        }

        fn service(&mut self) -> Result<(), DisplayError> {
            self.record(Op::Service);
            if self.fail_services > 0 {
                self.fail_services -= 1;
                return Err(DisplayError::Communication);
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        calls: u32,
        total_ms: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.calls += 1;
            self.total_ms += ns / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.calls += 1;
            self.total_ms += ms;
        }
    }

    fn started(engine: &mut MockEngine) -> RotationController<&mut MockEngine, MockDelay> {
        RotationController::start(engine, MockDelay::default(), &RotationConfig::default())
            .unwrap()
    }

    #[test]
    fn test_start_requires_ready_display() {
        let mut engine = MockEngine::new(false);
        let result =
            RotationController::start(&mut engine, MockDelay::default(), &RotationConfig::default());

        assert!(matches!(result, Err(StartupError::NotReady)));
        assert!(engine.ops().is_empty());
        assert!(!engine.driver.enabled);
    }

    #[test]
    fn test_start_services_then_enables() {
        let mut engine = MockEngine::new(true);
        let controller = started(&mut engine);
        assert_eq!(controller.current(), DemoId::Text);
        drop(controller);

        assert_eq!(engine.ops(), &[Op::Service]);
        assert!(engine.driver.enabled);
    }

    #[test]
    fn test_cycle_sequence() {
        let mut engine = MockEngine::new(true);
        let mut controller = started(&mut engine);

        assert_eq!(controller.run_cycle(), Ok(DemoId::Lines));
        assert_eq!(controller.delay.calls, 67);
        assert_eq!(controller.delay.total_ms, 2010);
        drop(controller);

        let ops = engine.ops();
        // Startup pass, then clear -> render -> forced pass
        assert_eq!(
            &ops[..4],
            &[Op::Service, Op::Clear, Op::Render(DemoId::Text), Op::Service]
        );
        // One service per dwell tick
        assert!(ops[4..].iter().all(|&op| op == Op::Service));
        assert_eq!(ops.len(), 4 + 67);
    }

    #[test]
    fn test_full_rotation_wraps() {
        let mut engine = MockEngine::new(true);
        let mut controller = started(&mut engine);

        for expected in DEMOS.iter().cycle().skip(1).take(DEMO_COUNT) {
            assert_eq!(controller.run_cycle(), Ok(*expected));
        }
        assert_eq!(controller.current(), DemoId::Text);
        drop(controller);

        for demo in DEMOS {
            assert_eq!(engine.count(Op::Render(demo)), 1);
        }
        assert_eq!(engine.count(Op::Clear), DEMO_COUNT);
    }

    #[test]
    fn test_render_error_still_advances() {
        let mut engine = MockEngine::new(true);
        engine.fail_render = Some(DemoId::Text);
        let mut controller = started(&mut engine);

        assert_eq!(
            controller.run_cycle(),
            Err(DisplayError::Canvas(CanvasError::EmptyRegion))
        );
        assert_eq!(controller.current(), DemoId::Lines);
        // Full dwell was still honoured
        assert_eq!(controller.delay.calls, 67);
    }

    #[test]
    fn test_service_error_reports_first_and_advances() {
        let mut engine = MockEngine::new(true);
        let mut controller = started(&mut engine);
        controller.show_current().unwrap();

        controller.engine.fail_services = 2;
        assert_eq!(controller.dwell(), Err(DisplayError::Communication));
        assert_eq!(controller.current(), DemoId::Lines);

        // Recovered on the next cycle
        assert_eq!(controller.run_cycle(), Ok(DemoId::Arc));
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let mut engine = MockEngine::new(true);
        let config = RotationConfig {
            dwell_ms: 5,
            tick_ms: 0,
        };
        let mut controller =
            RotationController::start(&mut engine, MockDelay::default(), &config).unwrap();

        assert_eq!(controller.run_cycle(), Ok(DemoId::Lines));
        assert_eq!(controller.delay.calls, 5);
        assert_eq!(controller.delay.calls, config.ticks_per_dwell());
    }

    #[test]
    fn test_dwell_length_matches_config_ticks() {
        for (dwell_ms, tick_ms) in [(2000, 30), (1000, 50), (7, 0), (0, 30), (10, 25)] {
            let mut engine = MockEngine::new(true);
            let config = RotationConfig { dwell_ms, tick_ms };
            let mut controller =
                RotationController::start(&mut engine, MockDelay::default(), &config).unwrap();

            controller.dwell().unwrap();
            assert_eq!(
                controller.delay.calls,
                config.ticks_per_dwell(),
                "dwell {} tick {}",
                dwell_ms,
                tick_ms
            );
        }
    }
}
