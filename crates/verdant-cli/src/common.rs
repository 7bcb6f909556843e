//! Shared CLI plumbing: tuning file loading, the action language used by
//! `run` and `shell`, and the donation-count validation boundary.
//!
//! The core trusts its callers on donation input, so the positive-integer
//! check lives here, before the ledger is ever called.

use std::error::Error;
use std::fs;
use std::path::Path;

use verdant_core::{AppCoordinator, Challenge, Event, Tuning, ValidationError};

/// Cosmetic tree variants shown at max level, in rotation order.
pub const COSMETIC_VARIANTS: [&str; 6] = [
    "valentines",
    "flowers",
    "easter",
    "apples",
    "halloween",
    "christmas",
];

/// Load tuning from a TOML file, or fall back to defaults.
pub fn load_tuning(path: Option<&Path>) -> Result<Tuning, Box<dyn Error>> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("failed to read tuning file {}: {e}", path.display()))?;
            Ok(toml::from_str(&raw)?)
        }
        None => Ok(Tuning::default()),
    }
}

/// Validate a donation item count: a positive whole number.
pub fn parse_item_count(raw: &str) -> Result<u32, ValidationError> {
    match raw.parse::<u32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(ValidationError::InvalidItemCount {
            value: raw.to_string(),
        }),
    }
}

/// One step of the action language.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Complete(u32),
    Reset(u32),
    Donate(u32),
    Advance(f64),
    SetProgress(f32),
    ResetProgress,
    Cosmetic,
    Goto(verdant_core::Screen),
    Home,
    Status,
    Challenges,
}

/// Parse one line/step of the action language. Blank lines and `#` comments
/// parse to `None`.
pub fn parse_action(input: &str) -> Result<Option<Action>, Box<dyn Error>> {
    let mut parts = input.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    if word.starts_with('#') {
        return Ok(None);
    }

    let action = match word {
        "complete" => Action::Complete(required_arg(parts.next(), word)?.parse()?),
        "reset" => Action::Reset(required_arg(parts.next(), word)?.parse()?),
        "donate" => Action::Donate(parse_item_count(required_arg(parts.next(), word)?)?),
        "advance" => Action::Advance(required_arg(parts.next(), word)?.parse()?),
        "progress" => Action::SetProgress(required_arg(parts.next(), word)?.parse()?),
        "reset-progress" => Action::ResetProgress,
        "cosmetic" => Action::Cosmetic,
        "goto" => Action::Goto(required_arg(parts.next(), word)?.parse()?),
        "home" => Action::Home,
        "status" => Action::Status,
        "challenges" => Action::Challenges,
        other => return Err(format!("unknown action '{other}' (try 'help')").into()),
    };

    if let Some(extra) = parts.next() {
        return Err(format!("unexpected argument '{extra}' for '{word}'").into());
    }
    Ok(Some(action))
}

fn required_arg<'a>(arg: Option<&'a str>, action: &str) -> Result<&'a str, Box<dyn Error>> {
    arg.ok_or_else(|| format!("'{action}' needs an argument").into())
}

/// Apply one action to the session. Returns the event to print, if the
/// action produced one (silent no-ops and list printing return `None`).
pub fn apply(app: &mut AppCoordinator, action: Action) -> Option<Event> {
    match action {
        Action::Complete(id) => app.complete_challenge(id),
        Action::Reset(id) => app.reset_challenge(id),
        Action::Donate(count) => Some(app.donate_clothing(count)),
        Action::Advance(amount) => Some(app.advance_progress(amount)),
        Action::SetProgress(value) => Some(app.set_progress(value)),
        Action::ResetProgress => Some(app.reset_progress()),
        Action::Cosmetic => app.advance_cosmetic(COSMETIC_VARIANTS.len()),
        Action::Goto(screen) => Some(app.navigate_to(screen)),
        Action::Home => Some(app.navigate_home()),
        Action::Status => Some(app.snapshot()),
        Action::Challenges => {
            print_challenges(&app.challenges());
            None
        }
    }
}

/// Human-readable catalog listing.
pub fn print_challenges(challenges: &[Challenge]) {
    for challenge in challenges {
        let mark = if challenge.completed { "x" } else { " " };
        println!(
            "[{mark}] {:>2}  {} ({}, {} pts)",
            challenge.id,
            challenge.title,
            challenge.category.display_name(),
            challenge.points
        );
        println!("        {}", challenge.description);
    }
}

pub fn print_help() {
    println!("actions:");
    println!("  complete <id>     mark a challenge completed");
    println!("  reset <id>        un-complete a challenge");
    println!("  donate <count>    donate <count> clothing items");
    println!("  advance <amount>  advance raw progress (1.0 = one level)");
    println!("  progress <value>  set the bar directly (0.0 - 1.0)");
    println!("  reset-progress    back to level 1, empty bar");
    println!("  cosmetic          next cosmetic variant ({} total)", COSMETIC_VARIANTS.len());
    println!("  goto <screen>     home | progress | challenge");
    println!("  home              shortcut for 'goto home'");
    println!("  status            print a state snapshot");
    println!("  challenges        list the catalog");
}
