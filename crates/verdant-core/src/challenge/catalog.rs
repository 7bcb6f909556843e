//! Challenge catalog types and seed data.

use serde::{Deserialize, Serialize};

/// A sustainability challenge.
///
/// Immutable apart from the `completed` flag, which the ledger toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub points: u32,
    pub category: ChallengeCategory,
    #[serde(default)]
    pub completed: bool,
}

/// Categories for organizing challenges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeCategory {
    Energy,
    Water,
    Waste,
    Transport,
    Food,
}

impl ChallengeCategory {
    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChallengeCategory::Energy => "Energy",
            ChallengeCategory::Water => "Water",
            ChallengeCategory::Waste => "Waste",
            ChallengeCategory::Transport => "Transport",
            ChallengeCategory::Food => "Food",
        }
    }
}

fn challenge(
    id: u32,
    title: &str,
    description: &str,
    points: u32,
    category: ChallengeCategory,
) -> Challenge {
    Challenge {
        id,
        title: title.to_string(),
        description: description.to_string(),
        points,
        category,
        completed: false,
    }
}

/// The fixed seed catalog every ledger starts from.
pub fn seed_challenges() -> Vec<Challenge> {
    use ChallengeCategory::*;
    vec![
        challenge(
            1,
            "Use Reusable Water Bottle",
            "Use a reusable water bottle for a whole day instead of single-use plastic",
            10,
            Waste,
        ),
        challenge(
            2,
            "Turn Off Lights",
            "Turn off all lights when leaving a room for one day",
            15,
            Energy,
        ),
        challenge(
            3,
            "Take Shorter Showers",
            "Reduce shower time by 5 minutes",
            20,
            Water,
        ),
        challenge(
            4,
            "Bike or Walk",
            "Use bike or walk instead of driving for short trips",
            25,
            Transport,
        ),
        challenge(5, "Meatless Monday", "Go vegetarian for one day", 30, Food),
        challenge(
            6,
            "Unplug Devices",
            "Unplug electronic devices when not in use",
            15,
            Energy,
        ),
        challenge(
            7,
            "Recycle Properly",
            "Sort and recycle all waste for one day",
            20,
            Waste,
        ),
        challenge(
            8,
            "Reusable Shopping Bags",
            "Use reusable bags for all shopping trips",
            10,
            Waste,
        ),
        challenge(
            9,
            "Public Transport",
            "Use public transportation for your commute",
            25,
            Transport,
        ),
        challenge(
            10,
            "Reduce Food Waste",
            "Plan meals and use all leftovers",
            20,
            Food,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique_and_ordered() {
        let catalog = seed_challenges();
        assert_eq!(catalog.len(), 10);
        let ids: Vec<u32> = catalog.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn seed_points_are_positive_and_none_completed() {
        for challenge in seed_challenges() {
            assert!(challenge.points > 0, "challenge {} has no points", challenge.id);
            assert!(!challenge.completed);
        }
    }

    #[test]
    fn category_display_names() {
        assert_eq!(ChallengeCategory::Energy.display_name(), "Energy");
        assert_eq!(ChallengeCategory::Transport.display_name(), "Transport");
    }
}
