use std::error::Error;
use std::path::Path;

use tracing::debug;
use verdant_core::AppCoordinator;

use crate::common;

/// Apply a whitespace script of actions to a fresh session, printing each
/// resulting event as JSON and ending with a snapshot.
pub fn run(config: Option<&Path>, steps: &[String]) -> Result<(), Box<dyn Error>> {
    let tuning = common::load_tuning(config)?;
    let mut app = AppCoordinator::with_tuning(tuning);

    for step in steps {
        debug!(step = %step, "applying action");
        if let Some(action) = common::parse_action(step)? {
            if let Some(event) = common::apply(&mut app, action) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
    Ok(())
}
