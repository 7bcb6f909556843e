//! Challenge ledger implementation.
//!
//! The ledger owns the challenge catalog and the cumulative point total.
//! Points arrive from two sources: challenge completion (reversible per id)
//! and donations (uncapped, independent of the catalog). `total_points` is
//! therefore an independent ledger value, not a field derived from the
//! catalog.
//!
//! Expected misuse -- unknown ids, repeated completes, repeated resets --
//! is a silent no-op (`None`). Donation item counts are assumed validated
//! by the caller; the ledger applies them unconditionally.

use chrono::Utc;
use tracing::debug;

use super::catalog::{seed_challenges, Challenge};
use crate::events::Event;
use crate::observe::Signal;

/// Points granted per donated item.
pub const POINTS_PER_ITEM: u32 = 10;

/// Tracks challenge completion and the resulting point total.
#[derive(Debug)]
pub struct ChallengeLedger {
    challenges: Vec<Challenge>,
    total_points: Signal<u64>,
    points_per_item: u32,
}

impl ChallengeLedger {
    /// Create a ledger seeded with the standard catalog.
    pub fn new() -> Self {
        Self::with_points_per_item(POINTS_PER_ITEM)
    }

    /// Create a ledger with a custom donation rate.
    pub fn with_points_per_item(points_per_item: u32) -> Self {
        Self::with_catalog(seed_challenges(), points_per_item)
    }

    /// Create a ledger from an explicit catalog. Challenges already marked
    /// completed count toward the starting total.
    pub fn with_catalog(challenges: Vec<Challenge>, points_per_item: u32) -> Self {
        let initial: u64 = challenges
            .iter()
            .filter(|c| c.completed)
            .map(|c| u64::from(c.points))
            .sum();
        Self {
            challenges,
            total_points: Signal::new(initial),
            points_per_item,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn challenge(&self, id: u32) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn total_points(&self) -> u64 {
        self.total_points.get()
    }

    pub fn points_per_item(&self) -> u32 {
        self.points_per_item
    }

    /// Sum of points of currently-completed challenges. Equals
    /// `total_points()` only while no donations have been made.
    pub fn completed_points(&self) -> u64 {
        self.challenges
            .iter()
            .filter(|c| c.completed)
            .map(|c| u64::from(c.points))
            .sum()
    }

    /// Register a subscriber on the point total. The current total is
    /// delivered immediately; every later mutation delivers the new total
    /// before the mutating call returns.
    pub fn subscribe_points(&mut self, f: impl Fn(&u64) + 'static) {
        self.total_points.subscribe(f);
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Mark a challenge completed and award its points.
    ///
    /// Returns `None` when the id is unknown or the challenge is already
    /// completed; repeating the call while completed never double-awards.
    pub fn complete(&mut self, id: u32) -> Option<Event> {
        let challenge = self.challenges.iter_mut().find(|c| c.id == id)?;
        if challenge.completed {
            return None;
        }
        challenge.completed = true;
        let points = challenge.points;
        let total = self.total_points.get() + u64::from(points);
        debug!(id, points, total, "challenge completed");
        self.total_points.set(total);
        Some(Event::ChallengeCompleted {
            id,
            points,
            total_points: total,
            at: Utc::now(),
        })
    }

    /// Un-complete a challenge and take its points back.
    ///
    /// Returns `None` when the id is unknown or the challenge is not
    /// completed.
    pub fn reset(&mut self, id: u32) -> Option<Event> {
        let challenge = self.challenges.iter_mut().find(|c| c.id == id)?;
        if !challenge.completed {
            return None;
        }
        challenge.completed = false;
        let points = challenge.points;
        let total = self.total_points.get().saturating_sub(u64::from(points));
        debug!(id, points, total, "challenge reset");
        self.total_points.set(total);
        Some(Event::ChallengeReset {
            id,
            points,
            total_points: total,
            at: Utc::now(),
        })
    }

    /// Grant donation points, independent of the catalog.
    ///
    /// `item_count` must already be validated as a positive whole number by
    /// the caller; the ledger applies it unconditionally.
    pub fn donate(&mut self, item_count: u32) -> Event {
        let points = u64::from(item_count) * u64::from(self.points_per_item);
        let total = self.total_points.get() + points;
        debug!(item_count, points, total, "donation recorded");
        self.total_points.set(total);
        Event::PointsDonated {
            item_count,
            points,
            total_points: total,
            at: Utc::now(),
        }
    }
}

impl Default for ChallengeLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn complete_awards_points_once() {
        let mut ledger = ChallengeLedger::new();
        assert!(ledger.complete(2).is_some());
        assert_eq!(ledger.total_points(), 15);

        // Repeat is a no-op.
        assert!(ledger.complete(2).is_none());
        assert_eq!(ledger.total_points(), 15);
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let mut ledger = ChallengeLedger::new();
        assert!(ledger.complete(99).is_none());
        assert!(ledger.reset(99).is_none());
        assert_eq!(ledger.total_points(), 0);
    }

    #[test]
    fn reset_takes_points_back() {
        let mut ledger = ChallengeLedger::new();
        ledger.complete(4);
        assert_eq!(ledger.total_points(), 25);
        assert!(ledger.reset(4).is_some());
        assert_eq!(ledger.total_points(), 0);
        assert!(!ledger.challenge(4).unwrap().completed);

        // Resetting a not-completed challenge is a no-op.
        assert!(ledger.reset(4).is_none());
    }

    #[test]
    fn total_matches_completed_sum_without_donations() {
        let mut ledger = ChallengeLedger::new();
        ledger.complete(1);
        ledger.complete(5);
        ledger.complete(9);
        ledger.reset(5);
        assert_eq!(ledger.total_points(), ledger.completed_points());
    }

    #[test]
    fn donations_bypass_the_catalog() {
        let mut ledger = ChallengeLedger::new();
        let event = ledger.donate(3);
        assert_eq!(ledger.total_points(), 30);
        assert_eq!(ledger.completed_points(), 0);
        match event {
            Event::PointsDonated {
                item_count, points, ..
            } => {
                assert_eq!(item_count, 3);
                assert_eq!(points, 30);
            }
            other => panic!("expected PointsDonated, got {other:?}"),
        }
    }

    #[test]
    fn donation_is_additive() {
        let mut split = ChallengeLedger::new();
        split.donate(2);
        split.donate(5);

        let mut whole = ChallengeLedger::new();
        whole.donate(7);

        assert_eq!(split.total_points(), whole.total_points());
    }

    #[test]
    fn subscribers_see_every_total_before_the_call_returns() {
        let mut ledger = ChallengeLedger::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        ledger.subscribe_points(move |t| sink.borrow_mut().push(*t));

        ledger.complete(1); // +10
        ledger.donate(1); // +10
        ledger.reset(1); // -10
        assert_eq!(*seen.borrow(), vec![0, 10, 20, 10]);
    }

    #[test]
    fn precompleted_catalog_counts_toward_total() {
        let mut catalog = seed_challenges();
        catalog[0].completed = true;
        let ledger = ChallengeLedger::with_catalog(catalog, POINTS_PER_ITEM);
        assert_eq!(ledger.total_points(), 10);
    }
}
