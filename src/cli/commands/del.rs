use crate::cli::parser::Commands;
use crate::core::Tracker;
use crate::core::del::DeleteLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, tracker: &mut Tracker) -> AppResult<()> {
    if let Commands::Del { id, force } = cmd {
        // Fail early when nobody is logged in, before prompting.
        tracker.current_user()?;

        if !*force && !ask_confirmation(&format!("Delete entry #{}?", id)) {
            info("Operation cancelled.");
            return Ok(());
        }

        if DeleteLogic::apply(tracker, *id)? {
            success(format!("Entry #{} has been deleted.", id));
        } else {
            info(format!("No entry #{}; nothing to delete.", id));
        }
    }

    Ok(())
}
