//! Demo cursor and dwell timer

use crate::config::RotationConfig;
use crate::demo::{DemoId, DEMOS};

/// Rotation state
///
/// Holds the index of the demo on screen and the time it has been shown.
/// The only transition is "dwell elapsed": advance by one, wrapping.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rotation {
    /// Demo table, never empty
    demos: &'static [DemoId],
    /// Index into `demos`
    current: usize,
    /// Time the current demo has been shown (ms)
    elapsed_ms: u32,
    /// Time each demo is held (ms)
    dwell_ms: u32,
}

impl Rotation {
    /// Rotation over the standard demo table
    pub fn new(config: &RotationConfig) -> Self {
        Self {
            demos: &DEMOS,
            current: 0,
            elapsed_ms: 0,
            dwell_ms: config.dwell_ms,
        }
    }

    /// Rotation over a custom table
    ///
    /// Returns `None` for an empty table.
    pub fn with_demos(demos: &'static [DemoId], config: &RotationConfig) -> Option<Self> {
        if demos.is_empty() {
            return None;
        }
        Some(Self {
            demos,
            current: 0,
            elapsed_ms: 0,
            dwell_ms: config.dwell_ms,
        })
    }

    /// Demo on screen
    pub fn current(&self) -> DemoId {
        self.demos[self.current]
    }

    /// Zero-based index of the demo on screen
    pub fn index(&self) -> usize {
        self.current
    }

    /// One-based position, for log output
    pub fn position(&self) -> usize {
        self.current + 1
    }

    /// Number of demos in the table
    pub fn len(&self) -> usize {
        self.demos.len()
    }

    /// Always false; the table is validated on construction
    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }

    /// Time the current demo has been shown (ms)
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Time left before the next advance (ms)
    pub fn remaining_ms(&self) -> u32 {
        self.dwell_ms.saturating_sub(self.elapsed_ms)
    }

    /// Account for `elapsed_ms` of wall time
    ///
    /// Returns the new demo if the dwell ran out and the cursor advanced.
    /// At most one advance happens per call; any excess time is dropped.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<DemoId> {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms >= self.dwell_ms {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Move to the next demo immediately, wrapping at the end
    pub fn advance(&mut self) -> DemoId {
        self.current = (self.current + 1) % self.demos.len();
        self.elapsed_ms = 0;
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DEMO_COUNT;
    use proptest::prelude::*;

    fn rotation() -> Rotation {
        Rotation::new(&RotationConfig::default())
    }

    #[test]
    fn test_starts_at_first_demo() {
        let r = rotation();
        assert_eq!(r.current(), DemoId::Text);
        assert_eq!(r.index(), 0);
        assert_eq!(r.position(), 1);
        assert_eq!(r.len(), DEMO_COUNT);
        assert_eq!(r.remaining_ms(), 2000);
    }

    #[test]
    fn test_cycles_in_table_order() {
        let mut r = rotation();
        let mut seen = [DemoId::Text; DEMO_COUNT];
        for slot in seen.iter_mut() {
            *slot = r.current();
            r.advance();
        }
        assert_eq!(seen, DEMOS);
        assert_eq!(r.current(), DemoId::Text);
    }

    #[test]
    fn test_default_dwell_is_67_ticks() {
        let mut r = rotation();
        for _ in 0..66 {
            assert_eq!(r.tick(30), None);
        }
        assert_eq!(r.elapsed_ms(), 1980);
        assert_eq!(r.tick(30), Some(DemoId::Lines));
        assert_eq!(r.elapsed_ms(), 0);
    }

    #[test]
    fn test_five_dwell_periods_wrap_to_start() {
        let config = RotationConfig::default();
        let mut r = Rotation::new(&config);
        let start = r.current();

        let mut advances = 0;
        for _ in 0..DEMO_COUNT {
            for _ in 0..config.ticks_per_dwell() {
                if r.tick(config.tick_ms).is_some() {
                    advances += 1;
                }
            }
        }

        assert_eq!(advances, DEMO_COUNT);
        assert_eq!(r.current(), start);
    }

    #[test]
    fn test_single_large_tick_advances_once() {
        let mut r = rotation();
        assert_eq!(r.tick(10_000), Some(DemoId::Lines));
        assert_eq!(r.index(), 1);
    }

    #[test]
    fn test_custom_table() {
        static PAIR: [DemoId; 2] = [DemoId::Image, DemoId::Canvas];
        let config = RotationConfig::default();

        assert!(Rotation::with_demos(&[], &config).is_none());

        let mut r = Rotation::with_demos(&PAIR, &config).unwrap();
        assert_eq!(r.current(), DemoId::Image);
        assert_eq!(r.advance(), DemoId::Canvas);
        assert_eq!(r.advance(), DemoId::Image);
    }

    proptest! {
        #[test]
        fn prop_index_after_n_advances(n in 0usize..100) {
            let mut r = rotation();
            for _ in 0..n {
                r.advance();
            }
            prop_assert_eq!(r.index(), n % DEMO_COUNT);
            prop_assert_eq!(r.current(), DEMOS[n % DEMO_COUNT]);
        }

        #[test]
        fn prop_advances_only_at_dwell(dwell_ms in 1u32..5000, tick_ms in 1u32..200) {
            let config = RotationConfig { dwell_ms, tick_ms };
            let mut r = Rotation::new(&config);
            let ticks = config.ticks_per_dwell();

            for _ in 1..ticks {
                prop_assert!(r.tick(tick_ms).is_none());
            }
            prop_assert!(r.tick(tick_ms).is_some());
            prop_assert_eq!(r.index(), 1);
        }
    }
}
