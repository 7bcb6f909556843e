//! Error types for verdant-core.
//!
//! The state holders themselves never fail on expected misuse -- unknown
//! ids, repeated toggles and out-of-range values are silent no-ops or
//! clamps. These types exist for the validation boundary the presentation
//! layer owns: donation counts and screen names must be checked before the
//! corresponding commands are issued.

use thiserror::Error;

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Donation item counts must be positive whole numbers; the ledger
    /// assumes its caller checked this.
    #[error("invalid donation count '{value}': expected a positive whole number")]
    InvalidItemCount { value: String },

    /// Unrecognized screen name
    #[error("unknown screen '{name}' (expected one of: home, progress, challenge)")]
    UnknownScreen { name: String },
}
