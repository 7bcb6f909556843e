use std::error::Error;

use verdant_core::{seed_challenges, ChallengeCategory};

use crate::common;

const CATEGORIES: [ChallengeCategory; 5] = [
    ChallengeCategory::Energy,
    ChallengeCategory::Water,
    ChallengeCategory::Waste,
    ChallengeCategory::Transport,
    ChallengeCategory::Food,
];

fn parse_category(name: &str) -> Result<ChallengeCategory, Box<dyn Error>> {
    CATEGORIES
        .into_iter()
        .find(|c| c.display_name().eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            let known: Vec<&str> = CATEGORIES.iter().map(|c| c.display_name()).collect();
            format!("unknown category '{name}' (expected one of: {})", known.join(", ")).into()
        })
}

pub fn run(json: bool, category: Option<&str>) -> Result<(), Box<dyn Error>> {
    let mut catalog = seed_challenges();
    if let Some(name) = category {
        let category = parse_category(name)?;
        catalog.retain(|c| c.category == category);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        common::print_challenges(&catalog);
        let total: u64 = catalog.iter().map(|c| u64::from(c.points)).sum();
        println!("{} challenges, {} points available", catalog.len(), total);
    }
    Ok(())
}
