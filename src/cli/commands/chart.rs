use crate::config::Config;
use crate::core::Tracker;
use crate::core::calculator::chart::PeriodTotal;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{bar, pad_right};
use ansi_term::Colour;

const LABEL_WIDTH: usize = 16;

fn render(totals: &[PeriodTotal], width: usize, colour: Colour, fmt: impl Fn(f64) -> String) {
    let max = totals.iter().map(|t| t.value).fold(0.0, f64::max);

    for t in totals {
        println!(
            "{} {} {}",
            pad_right(&t.period, LABEL_WIDTH),
            colour.paint(bar(t.value, max, width)),
            fmt(t.value)
        );
    }
}

pub fn handle(cfg: &Config, tracker: &Tracker) -> AppResult<()> {
    let hours = tracker.hours_chart()?;
    if hours.is_empty() {
        info("No entries to chart yet.");
        return Ok(());
    }
    let earnings = tracker.earnings_chart()?;

    header("Hours Worked");
    render(&hours, cfg.chart_width, Colour::Purple, |v| format!("{:.1} h", v));

    println!();
    header(format!("Earnings ({})", cfg.currency));
    render(&earnings, cfg.chart_width, Colour::Green, |v| {
        format!("{}{:.2}", cfg.currency, v)
    });

    Ok(())
}
