use std::error::Error;
use std::io::{self, BufRead};
use std::path::Path;

use verdant_core::AppCoordinator;

use crate::common;

/// Interactive session: one action per stdin line, events echoed as
/// compact JSON. `quit` or end-of-input ends the session.
pub fn run(config: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let tuning = common::load_tuning(config)?;
    let mut app = AppCoordinator::with_tuning(tuning);

    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        match trimmed {
            "quit" | "exit" => break,
            "help" => {
                common::print_help();
                continue;
            }
            _ => {}
        }
        match common::parse_action(trimmed) {
            Ok(Some(action)) => {
                if let Some(event) = common::apply(&mut app, action) {
                    println!("{}", serde_json::to_string(&event)?);
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}
