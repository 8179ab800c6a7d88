use crate::cli::parser::Commands;
use crate::core::Tracker;
use crate::core::auth::AuthLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

fn scope(remember: bool) -> &'static str {
    if remember {
        "remembered on this machine"
    } else {
        "for this terminal session"
    }
}

/// Handle `register`, `login`, `logout` and `whoami`.
pub fn handle(cmd: &Commands, tracker: &mut Tracker) -> AppResult<()> {
    match cmd {
        Commands::Register {
            username,
            password,
            remember,
        } => {
            AuthLogic::register(tracker, username, password, *remember)?;
            success(format!(
                "Registered '{}' and logged in ({}).",
                username,
                scope(*remember)
            ));
        }
        Commands::Login {
            username,
            password,
            remember,
        } => {
            AuthLogic::login(tracker, username, password, *remember)?;
            success(format!("Welcome, {} ({}).", username, scope(*remember)));
        }
        Commands::Logout => {
            AuthLogic::logout(tracker);
            success("Logged out.");
        }
        Commands::Whoami => match tracker.session() {
            Some(s) => println!("{} ({})", s.username, scope(s.remember)),
            None => info("Not logged in."),
        },
        _ => {}
    }

    Ok(())
}
