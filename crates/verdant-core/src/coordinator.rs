//! Application coordinator.
//!
//! Owns navigation state plus one [`ChallengeLedger`] and one
//! [`ProgressEngine`] for its whole lifetime, and wires the ledger's point
//! stream into engine advancement. The wiring is a subscription installed
//! once at construction: every published total is converted into a delta
//! against the last total already applied, and each whole point of delta
//! becomes one fixed fractional advance. Tracking the applied total here
//! keeps the translation idempotent -- a replayed value can never be
//! re-derived into extra progress.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::challenge::{Challenge, ChallengeLedger};
use crate::config::Tuning;
use crate::error::ValidationError;
use crate::events::Event;
use crate::observe::Signal;
use crate::progress::ProgressEngine;

/// Whole points required to fill one level.
pub const POINTS_PER_LEVEL: u32 = 50;

/// Top-level navigation destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Home,
    Progress,
    Challenge,
}

impl FromStr for Screen {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(Screen::Home),
            "progress" => Ok(Screen::Progress),
            "challenge" | "challenges" => Ok(Screen::Challenge),
            _ => Err(ValidationError::UnknownScreen {
                name: s.to_string(),
            }),
        }
    }
}

/// Application-level state holder.
///
/// The ledger and engine live behind `Rc<RefCell<…>>` because the point
/// subscription closure needs shared single-threaded access to the engine;
/// all public access still goes through this type.
#[derive(Debug)]
pub struct AppCoordinator {
    screen: Signal<Screen>,
    ledger: Rc<RefCell<ChallengeLedger>>,
    engine: Rc<RefCell<ProgressEngine>>,
    /// Last total already converted into engine advancement.
    previous_total_points: Rc<Cell<u64>>,
}

impl AppCoordinator {
    /// Create a coordinator with the default point economy.
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    /// Create a coordinator with explicit tuning.
    pub fn with_tuning(tuning: Tuning) -> Self {
        let ledger = Rc::new(RefCell::new(ChallengeLedger::with_points_per_item(
            tuning.points_per_item,
        )));
        let engine = Rc::new(RefCell::new(ProgressEngine::new()));
        let previous_total_points = Rc::new(Cell::new(0u64));

        // Each whole point contributes one fixed fractional increment;
        // fractional points are not representable.
        let progress_per_point = 1.0 / f64::from(tuning.points_per_level.max(1));
        {
            let engine = Rc::clone(&engine);
            let previous = Rc::clone(&previous_total_points);
            ledger.borrow_mut().subscribe_points(move |&total| {
                let delta = total.saturating_sub(previous.get());
                previous.set(total);
                if delta > 0 {
                    debug!(total, delta, "translating points into progress");
                }
                for _ in 0..delta {
                    engine.borrow_mut().advance(progress_per_point);
                }
            });
        }

        Self {
            screen: Signal::new(Screen::Home),
            ledger,
            engine,
            previous_total_points,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current_screen(&self) -> Screen {
        self.screen.get()
    }

    /// True when the progress screen is the current destination.
    pub fn on_progress_screen(&self) -> bool {
        self.screen.get() == Screen::Progress
    }

    pub fn total_points(&self) -> u64 {
        self.ledger.borrow().total_points()
    }

    pub fn challenges(&self) -> Vec<Challenge> {
        self.ledger.borrow().challenges().to_vec()
    }

    pub fn progress(&self) -> f32 {
        self.engine.borrow().fraction()
    }

    pub fn level(&self) -> u32 {
        self.engine.borrow().level()
    }

    pub fn is_max_level(&self) -> bool {
        self.engine.borrow().is_max_level()
    }

    pub fn cosmetic_index(&self) -> usize {
        self.engine.borrow().cosmetic_index()
    }

    /// Last point total already translated into engine advancement.
    pub fn applied_points(&self) -> u64 {
        self.previous_total_points.get()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let ledger = self.ledger.borrow();
        let engine = self.engine.borrow();
        Event::StateSnapshot {
            total_points: ledger.total_points(),
            fraction: engine.fraction(),
            level: engine.level(),
            is_max_level: engine.is_max_level(),
            cosmetic_index: engine.cosmetic_index(),
            screen: self.screen.get(),
            on_progress_screen: self.on_progress_screen(),
            at: Utc::now(),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_points(&self, f: impl Fn(&u64) + 'static) {
        self.ledger.borrow_mut().subscribe_points(f);
    }

    pub fn subscribe_progress(&self, f: impl Fn(&f32) + 'static) {
        self.engine.borrow_mut().subscribe_fraction(f);
    }

    pub fn subscribe_level(&self, f: impl Fn(&u32) + 'static) {
        self.engine.borrow_mut().subscribe_level(f);
    }

    pub fn subscribe_cosmetic(&self, f: impl Fn(&usize) + 'static) {
        self.engine.borrow_mut().subscribe_cosmetic(f);
    }

    pub fn subscribe_screen(&mut self, f: impl Fn(&Screen) + 'static) {
        self.screen.subscribe(f);
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Navigate to a screen and update the derived progress-screen flag.
    pub fn navigate_to(&mut self, screen: Screen) -> Event {
        self.screen.set(screen);
        Event::ScreenChanged {
            screen,
            on_progress_screen: self.on_progress_screen(),
            at: Utc::now(),
        }
    }

    /// Shortcut for returning home.
    pub fn navigate_home(&mut self) -> Event {
        self.navigate_to(Screen::Home)
    }

    /// Record a clothing donation. `item_count` must be pre-validated as a
    /// positive whole number by the presentation layer.
    pub fn donate_clothing(&mut self, item_count: u32) -> Event {
        self.ledger.borrow_mut().donate(item_count)
    }

    pub fn complete_challenge(&mut self, id: u32) -> Option<Event> {
        self.ledger.borrow_mut().complete(id)
    }

    pub fn reset_challenge(&mut self, id: u32) -> Option<Event> {
        self.ledger.borrow_mut().reset(id)
    }

    pub fn advance_progress(&mut self, amount: f64) -> Event {
        self.engine.borrow_mut().advance(amount)
    }

    pub fn set_progress(&mut self, value: f32) -> Event {
        self.engine.borrow_mut().set_progress(value)
    }

    pub fn reset_progress(&mut self) -> Event {
        self.engine.borrow_mut().reset()
    }

    pub fn advance_cosmetic(&mut self, total: usize) -> Option<Event> {
        self.engine.borrow_mut().advance_cosmetic(total)
    }
}

impl Default for AppCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn navigation_updates_the_derived_flag() {
        let mut app = AppCoordinator::new();
        assert_eq!(app.current_screen(), Screen::Home);
        assert!(!app.on_progress_screen());

        app.navigate_to(Screen::Progress);
        assert!(app.on_progress_screen());

        app.navigate_to(Screen::Challenge);
        assert!(!app.on_progress_screen());

        app.navigate_home();
        assert_eq!(app.current_screen(), Screen::Home);
    }

    #[test]
    fn completed_points_flow_into_progress() {
        let mut app = AppCoordinator::new();
        app.complete_challenge(2); // 15 points
        assert_eq!(app.total_points(), 15);
        assert_close(app.progress(), 15.0 / 50.0);
        assert_eq!(app.level(), 1);
    }

    #[test]
    fn repeated_completion_does_not_double_count() {
        let mut app = AppCoordinator::new();
        app.complete_challenge(2);
        app.complete_challenge(2);
        assert_eq!(app.total_points(), 15);
        assert_close(app.progress(), 0.3);
    }

    #[test]
    fn donations_flow_into_progress() {
        let mut app = AppCoordinator::new();
        app.donate_clothing(5); // 50 points = one full level
        assert_eq!(app.total_points(), 50);
        assert_eq!(app.level(), 2);
        assert_close(app.progress(), 0.0);
    }

    #[test]
    fn point_regression_is_not_replayed_as_negative_progress() {
        let mut app = AppCoordinator::new();
        app.complete_challenge(2); // 15 points -> 0.3
        app.reset_challenge(2); // total back to 0, progress untouched
        assert_eq!(app.total_points(), 0);
        assert_eq!(app.applied_points(), 0);
        assert_close(app.progress(), 0.3);

        // Re-completing advances again from the new baseline.
        app.complete_challenge(2);
        assert_eq!(app.total_points(), 15);
        assert_close(app.progress(), 0.6);
    }

    #[test]
    fn custom_tuning_changes_the_exchange_rate() {
        // points_per_level of 4 keeps the per-point increment (0.25)
        // exactly representable.
        let mut app = AppCoordinator::with_tuning(Tuning {
            points_per_level: 4,
            points_per_item: 2,
        });
        app.donate_clothing(2); // 4 points = one level at this rate
        assert_eq!(app.total_points(), 4);
        assert_eq!(app.level(), 2);
    }

    #[test]
    fn screen_parsing() {
        assert_eq!("home".parse::<Screen>().unwrap(), Screen::Home);
        assert_eq!("Progress".parse::<Screen>().unwrap(), Screen::Progress);
        assert_eq!("challenges".parse::<Screen>().unwrap(), Screen::Challenge);
        assert!("garden".parse::<Screen>().is_err());
    }
}
