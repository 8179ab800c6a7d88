use crate::cli::parser::Commands;
use crate::core::Tracker;
use crate::core::add::AddLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Add a clock-in/clock-out entry for the logged-in user.
pub fn handle(cmd: &Commands, tracker: &mut Tracker) -> AppResult<()> {
    if let Commands::Add {
        date,
        clock_in,
        clock_out,
    } = cmd
    {
        // Missing fields are reported by the core validation.
        let entry = AddLogic::apply(
            tracker,
            date,
            clock_in.as_deref().unwrap_or(""),
            clock_out.as_deref().unwrap_or(""),
        )?;

        success(format!(
            "Added entry #{} on {}: {} → {} ({:.2} h).",
            entry.id,
            entry.date_str(),
            entry.clock_in_str(),
            entry.clock_out_str(),
            entry.hours
        ));
    }

    Ok(())
}
