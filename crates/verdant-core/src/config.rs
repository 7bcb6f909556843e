//! Tunable constants for the point economy.
//!
//! The core never reads or writes files; callers that want TOML tuning
//! (the CLI does) deserialize this struct themselves and pass it to
//! [`crate::AppCoordinator::with_tuning`].

use serde::{Deserialize, Serialize};

use crate::challenge::POINTS_PER_ITEM;
use crate::coordinator::POINTS_PER_LEVEL;

/// Point-economy tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    /// Whole points required to fill one level.
    #[serde(default = "default_points_per_level")]
    pub points_per_level: u32,
    /// Points granted per donated item.
    #[serde(default = "default_points_per_item")]
    pub points_per_item: u32,
}

fn default_points_per_level() -> u32 {
    POINTS_PER_LEVEL
}

fn default_points_per_item() -> u32 {
    POINTS_PER_ITEM
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            points_per_level: POINTS_PER_LEVEL,
            points_per_item: POINTS_PER_ITEM,
        }
    }
}
