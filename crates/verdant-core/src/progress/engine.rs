//! Progress engine implementation.
//!
//! The engine converts a stream of progress deltas into a normalized,
//! leveled display value. Overflow past a full bar carries into the next
//! level; the last level is terminal for leveling and caps the bar at full.
//!
//! ## State transitions
//!
//! ```text
//! level 1 -> 2 -> 3 -> 4 (MAX, terminal)
//!   ^                  |
//!   +----- reset() ----+
//! ```
//!
//! A transition fires each time the accumulated fraction crosses 1.0 while
//! below [`MAX_LEVEL`]. Cosmetic rotation is a side channel orthogonal to
//! leveling, meaningful only at max level.

use chrono::Utc;
use tracing::debug;

use crate::events::Event;
use crate::observe::Signal;

/// Terminal growth stage. 1 = sprout .. 4 = full tree.
pub const MAX_LEVEL: u32 = 4;

/// Converts progress deltas into a leveled, normalized display value.
///
/// The accumulator is kept at `f64` and only narrowed to `f32` at the
/// observable edge, so repeated small advances do not drift.
#[derive(Debug)]
pub struct ProgressEngine {
    /// High-precision accumulator backing the exposed fraction.
    accumulator: f64,
    fraction: Signal<f32>,
    level: Signal<u32>,
    cosmetic_index: Signal<usize>,
}

impl ProgressEngine {
    /// Create an engine at level 1 with an empty bar.
    pub fn new() -> Self {
        Self::with_state(0.0, 1)
    }

    /// Create an engine at an explicit starting point. The fraction is
    /// clamped to `[0, 1]` and the level to `[1, MAX_LEVEL]`.
    pub fn with_state(initial_fraction: f32, initial_level: u32) -> Self {
        let fraction = initial_fraction.clamp(0.0, 1.0);
        let level = initial_level.clamp(1, MAX_LEVEL);
        Self {
            accumulator: f64::from(fraction),
            fraction: Signal::new(fraction),
            level: Signal::new(level),
            cosmetic_index: Signal::new(0),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Progress within the current level, `0.0 ..= 1.0`.
    pub fn fraction(&self) -> f32 {
        self.fraction.get()
    }

    pub fn level(&self) -> u32 {
        self.level.get()
    }

    pub fn is_max_level(&self) -> bool {
        self.level.get() >= MAX_LEVEL
    }

    /// True when the bar is full. Only reachable at max level.
    pub fn is_complete(&self) -> bool {
        self.fraction.get() >= 1.0
    }

    pub fn cosmetic_index(&self) -> usize {
        self.cosmetic_index.get()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_fraction(&mut self, f: impl Fn(&f32) + 'static) {
        self.fraction.subscribe(f);
    }

    pub fn subscribe_level(&mut self, f: impl Fn(&u32) + 'static) {
        self.level.subscribe(f);
    }

    pub fn subscribe_cosmetic(&mut self, f: impl Fn(&usize) + 'static) {
        self.cosmetic_index.subscribe(f);
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add `amount` to the accumulator, consuming one full level at a time
    /// so each level-up is observable as a discrete increment. Once at max
    /// level the bar fills to 1.0 and caps there; overflow past the cap is
    /// not carried.
    pub fn advance(&mut self, amount: f64) -> Event {
        self.accumulator += amount;
        if self.accumulator < 0.0 {
            self.accumulator = 0.0;
        }

        let level_before = self.level.get();
        while self.accumulator >= 1.0 && self.level.get() < MAX_LEVEL {
            self.accumulator -= 1.0;
            self.level_up();
        }
        if self.level.get() >= MAX_LEVEL && self.accumulator > 1.0 {
            self.accumulator = 1.0;
        }
        self.fraction.set(self.accumulator as f32);

        let level = self.level.get();
        Event::ProgressAdvanced {
            fraction: self.fraction.get(),
            level,
            levels_gained: level - level_before,
            at: Utc::now(),
        }
    }

    /// Set the bar directly, clamped to `[0, 1]`.
    ///
    /// A full bar below max level triggers exactly one level-up -- unlike
    /// [`advance`](Self::advance) this never crosses more than one level
    /// per call. At max level the bar reads full regardless of input.
    pub fn set_progress(&mut self, value: f32) -> Event {
        let clamped = value.clamp(0.0, 1.0);
        let mut leveled_up = false;

        if clamped >= 1.0 && self.level.get() < MAX_LEVEL {
            self.accumulator = 0.0;
            self.level_up();
            leveled_up = true;
        } else if self.level.get() >= MAX_LEVEL {
            self.accumulator = 1.0;
            self.fraction.set(1.0);
        } else {
            self.accumulator = f64::from(clamped);
            self.fraction.set(clamped);
        }

        Event::ProgressSet {
            fraction: self.fraction.get(),
            level: self.level.get(),
            leveled_up,
            at: Utc::now(),
        }
    }

    /// Full reset: empty bar, level 1, un-maxed. The cosmetic index is a
    /// side channel and survives.
    pub fn reset(&mut self) -> Event {
        self.accumulator = 0.0;
        self.fraction.set(0.0);
        self.level.set(1);
        Event::ProgressReset { at: Utc::now() }
    }

    /// Rotate to the next cosmetic variant, wrapping at `total`. No-op when
    /// the set is empty.
    pub fn advance_cosmetic(&mut self, total: usize) -> Option<Event> {
        if total == 0 {
            return None;
        }
        let index = (self.cosmetic_index.get() + 1) % total;
        self.cosmetic_index.set(index);
        Some(Event::CosmeticAdvanced {
            index,
            total,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn level_up(&mut self) {
        if self.level.get() < MAX_LEVEL {
            let next = self.level.get() + 1;
            debug!(level = next, "level up");
            self.level.set(next);
            // The bar empties at the moment of increment so observers see
            // each level-up, even mid-loop.
            self.fraction.set(0.0);
        }
    }
}

impl Default for ProgressEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn advance_accumulates_below_one() {
        let mut engine = ProgressEngine::new();
        engine.advance(0.5);
        assert_close(engine.fraction(), 0.5);
        assert_eq!(engine.level(), 1);
    }

    #[test]
    fn overflow_carries_into_next_level() {
        let mut engine = ProgressEngine::new();
        engine.advance(0.5);
        let event = engine.advance(0.6);
        assert_eq!(engine.level(), 2);
        assert_close(engine.fraction(), 0.1);
        match event {
            Event::ProgressAdvanced { levels_gained, .. } => assert_eq!(levels_gained, 1),
            other => panic!("expected ProgressAdvanced, got {other:?}"),
        }
    }

    #[test]
    fn advance_can_cross_multiple_levels() {
        let mut engine = ProgressEngine::new();
        let levels = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&levels);
        engine.subscribe_level(move |l| sink.borrow_mut().push(*l));

        let event = engine.advance(2.5);
        assert_eq!(engine.level(), 3);
        assert_close(engine.fraction(), 0.5);
        // Each crossing was observable, not skipped.
        assert_eq!(*levels.borrow(), vec![1, 2, 3]);
        match event {
            Event::ProgressAdvanced { levels_gained, .. } => assert_eq!(levels_gained, 2),
            other => panic!("expected ProgressAdvanced, got {other:?}"),
        }
    }

    #[test]
    fn bar_refills_after_reaching_max_level_then_caps() {
        let mut engine = ProgressEngine::new();
        engine.advance(3.0);
        assert_eq!(engine.level(), MAX_LEVEL);
        assert_close(engine.fraction(), 0.0);

        engine.advance(0.4);
        assert_close(engine.fraction(), 0.4);
        assert_eq!(engine.level(), MAX_LEVEL);

        // Overflow past full is capped, not carried.
        engine.advance(5.0);
        assert_close(engine.fraction(), 1.0);
        assert!(engine.is_complete());

        engine.advance(0.3);
        assert_close(engine.fraction(), 1.0);
        assert_eq!(engine.level(), MAX_LEVEL);
    }

    #[test]
    fn set_progress_sets_directly_below_full() {
        let mut engine = ProgressEngine::new();
        engine.set_progress(0.75);
        assert_close(engine.fraction(), 0.75);
        assert_eq!(engine.level(), 1);

        // Out-of-range input clamps silently.
        engine.set_progress(-0.5);
        assert_close(engine.fraction(), 0.0);
        engine.set_progress(7.0);
        assert_eq!(engine.level(), 2);
    }

    #[test]
    fn set_progress_levels_once_even_past_full() {
        // A full bar via set_progress steps exactly one level, while an
        // equivalent advance would loop. The asymmetry is deliberate.
        let mut engine = ProgressEngine::new();
        let event = engine.set_progress(1.0);
        assert_eq!(engine.level(), 2);
        assert_close(engine.fraction(), 0.0);
        match event {
            Event::ProgressSet { leveled_up, .. } => assert!(leveled_up),
            other => panic!("expected ProgressSet, got {other:?}"),
        }

        let mut looped = ProgressEngine::new();
        looped.advance(3.0);
        assert_eq!(looped.level(), MAX_LEVEL);
    }

    #[test]
    fn set_progress_at_max_level_reads_full_regardless_of_input() {
        let mut engine = ProgressEngine::with_state(0.0, MAX_LEVEL);
        engine.set_progress(0.3);
        assert_close(engine.fraction(), 1.0);
        engine.set_progress(0.0);
        assert_close(engine.fraction(), 1.0);
        assert_eq!(engine.level(), MAX_LEVEL);
    }

    #[test]
    fn reset_restores_level_one_from_anywhere() {
        let mut engine = ProgressEngine::new();
        engine.advance(3.7);
        assert!(engine.is_max_level());
        engine.reset();
        assert_eq!(engine.level(), 1);
        assert_close(engine.fraction(), 0.0);
        assert!(!engine.is_max_level());
    }

    #[test]
    fn reset_leaves_cosmetic_index_alone() {
        let mut engine = ProgressEngine::new();
        engine.advance_cosmetic(6);
        engine.advance_cosmetic(6);
        engine.reset();
        assert_eq!(engine.cosmetic_index(), 2);
    }

    #[test]
    fn cosmetic_rotation_wraps() {
        let mut engine = ProgressEngine::new();
        for _ in 0..6 {
            assert!(engine.advance_cosmetic(6).is_some());
        }
        assert_eq!(engine.cosmetic_index(), 0);
    }

    #[test]
    fn cosmetic_rotation_with_empty_set_is_a_noop() {
        let mut engine = ProgressEngine::new();
        assert!(engine.advance_cosmetic(0).is_none());
        assert_eq!(engine.cosmetic_index(), 0);
    }

    #[test]
    fn negative_advance_clamps_at_empty() {
        let mut engine = ProgressEngine::new();
        engine.advance(0.3);
        engine.advance(-2.0);
        assert_close(engine.fraction(), 0.0);
        assert_eq!(engine.level(), 1);
    }

    #[test]
    fn with_state_clamps_inputs() {
        let engine = ProgressEngine::with_state(1.5, 9);
        assert_close(engine.fraction(), 1.0);
        assert_eq!(engine.level(), MAX_LEVEL);

        let engine = ProgressEngine::with_state(-1.0, 0);
        assert_close(engine.fraction(), 0.0);
        assert_eq!(engine.level(), 1);
    }
}
