use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coordinator::Screen;

/// Every state change in the system produces an Event.
/// Mutation methods return the event they produced; the presentation layer
/// renders or logs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ChallengeCompleted {
        id: u32,
        points: u32,
        total_points: u64,
        at: DateTime<Utc>,
    },
    ChallengeReset {
        id: u32,
        points: u32,
        total_points: u64,
        at: DateTime<Utc>,
    },
    /// Points granted outside the challenge catalog.
    PointsDonated {
        item_count: u32,
        points: u64,
        total_points: u64,
        at: DateTime<Utc>,
    },
    ProgressAdvanced {
        fraction: f32,
        level: u32,
        /// Levels crossed by this single call (0 when none).
        levels_gained: u32,
        at: DateTime<Utc>,
    },
    ProgressSet {
        fraction: f32,
        level: u32,
        leveled_up: bool,
        at: DateTime<Utc>,
    },
    ProgressReset {
        at: DateTime<Utc>,
    },
    CosmeticAdvanced {
        index: usize,
        total: usize,
        at: DateTime<Utc>,
    },
    ScreenChanged {
        screen: Screen,
        on_progress_screen: bool,
        at: DateTime<Utc>,
    },
    /// Full snapshot of the coordinator and both leaves.
    StateSnapshot {
        total_points: u64,
        fraction: f32,
        level: u32,
        is_max_level: bool,
        cosmetic_index: usize,
        screen: Screen,
        on_progress_screen: bool,
        at: DateTime<Utc>,
    },
}
