mod catalog;
mod ledger;

pub use catalog::{seed_challenges, Challenge, ChallengeCategory};
pub use ledger::{ChallengeLedger, POINTS_PER_ITEM};
