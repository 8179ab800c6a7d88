use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Tracker;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::{date, fmt_hours, fmt_money};

pub fn handle(cmd: &Commands, cfg: &Config, tracker: &Tracker) -> AppResult<()> {
    if let Commands::Cycle { today } = cmd {
        let day = match today {
            Some(raw) => date::parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?,
            None => date::today(),
        };

        let target = tracker.current_user()?.settings.target_hours_per_cycle;
        let stats = tracker.cycle_stats(day)?;

        header(format!("Current Cycle - {}", stats.cycle_label));
        println!("Period          : {} → {}", stats.start, stats.end);
        println!(
            "Hours worked    : {} of {} target hours",
            fmt_hours(stats.total_hours),
            target
        );
        println!("Hours remaining : {}", fmt_hours(stats.remaining_hours));
        println!(
            "Earnings        : {}",
            fmt_money(stats.earnings, &cfg.currency)
        );
    }

    Ok(())
}
