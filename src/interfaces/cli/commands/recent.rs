//! List recent links command

use colored::Colorize;

use crate::app::App;
use crate::cache::RECENT_LINKS_CAPACITY;
use crate::interfaces::cli::render_record;

pub fn list_recent(app: &App) {
    let recent = app.recent();
    if recent.is_empty() {
        println!("{} No recent links", "ℹ".bold().blue());
        return;
    }

    println!("{}", "Recent links:".bold().green());
    println!();
    for (i, record) in recent.records().iter().enumerate() {
        println!("  {}", render_record(i + 1, record));
    }
    println!();
    println!(
        "{} {} of {} kept locally",
        "ℹ".bold().blue(),
        recent.len().to_string().green(),
        RECENT_LINKS_CAPACITY
    );
}
