//! # Verdant Core Library
//!
//! This library provides the core state management for Verdant, a gamified
//! sustainability tracker: users complete challenges to earn points, points
//! accumulate into normalized progress, and progress drives level-ups of a
//! plant-growth metaphor (sprout to tree) with cosmetic variants at max
//! level. The presentation layer (screens, images, input fields) is a thin
//! consumer of this crate: it reads observable state and issues commands.
//!
//! ## Architecture
//!
//! - **Challenge ledger**: catalog of challenges plus the cumulative point
//!   total, with a donation channel independent of the catalog
//! - **Progress engine**: a normalizing state machine that converts progress
//!   deltas into levels, carrying overflow and capping at the max level
//! - **App coordinator**: owns navigation, owns both leaves, and translates
//!   the ledger's point stream into engine advancement
//!
//! Everything runs on one logical thread: state holders publish through
//! synchronous [`Signal`] listener lists, so every subscriber has seen a
//! mutation before the mutating call returns. No I/O, no persistence.
//!
//! ## Key Components
//!
//! - [`ChallengeLedger`]: challenge completion and point accounting
//! - [`ProgressEngine`]: leveling state machine
//! - [`AppCoordinator`]: navigation plus ledger-to-engine wiring
//! - [`Event`]: what every mutation reports to the presentation layer

pub mod challenge;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod observe;
pub mod progress;

pub use challenge::{seed_challenges, Challenge, ChallengeCategory, ChallengeLedger, POINTS_PER_ITEM};
pub use config::Tuning;
pub use coordinator::{AppCoordinator, Screen, POINTS_PER_LEVEL};
pub use error::ValidationError;
pub use events::Event;
pub use observe::Signal;
pub use progress::{ProgressEngine, MAX_LEVEL};
