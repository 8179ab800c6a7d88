use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Tracker;
use crate::core::settings::SettingsLogic;
use crate::errors::AppResult;
use crate::models::{Settings, SettingsUpdate};
use crate::ui::messages::{header, success};
use crate::utils::{fmt_hours, fmt_money};

fn print_settings(s: &Settings, cfg: &Config) {
    header("Settings");
    println!("Hourly rate            : {}", fmt_money(s.hourly_rate, &cfg.currency));
    println!("Daily working hours    : {}", s.daily_hours);
    println!("Working days per cycle : {}", s.working_days);
    println!(
        "Target per half-month  : {} hours ({} hours × {} days)",
        fmt_hours(s.target_hours_per_cycle),
        s.daily_hours,
        s.working_days
    );
}

pub fn handle(cmd: &Commands, cfg: &Config, tracker: &mut Tracker) -> AppResult<()> {
    if let Commands::Settings {
        rate,
        daily_hours,
        working_days,
        target,
    } = cmd
    {
        let update = SettingsUpdate {
            hourly_rate: *rate,
            daily_hours: *daily_hours,
            working_days: *working_days,
            target_hours: *target,
        };

        let settings = SettingsLogic::apply(tracker, &update)?;
        if !update.is_empty() {
            success("Settings updated.");
        }
        print_settings(&settings, cfg);
    }

    Ok(())
}
