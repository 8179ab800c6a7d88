use crate::core::Tracker;
use crate::core::add::entries_newest_first;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(tracker: &Tracker) -> AppResult<()> {
    let user = tracker.current_user()?;

    if user.entries.is_empty() {
        info("No entries yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("ID", 14),
        Column::new("Date", 10),
        Column::new("Clock In", 8),
        Column::new("Clock Out", 9),
        Column::new("Hours", 6),
    ]);

    for e in entries_newest_first(&user.entries) {
        table.add_row(vec![
            e.id.to_string(),
            e.date_str(),
            e.clock_in_str(),
            e.clock_out_str(),
            format!("{:.2}", e.hours),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
