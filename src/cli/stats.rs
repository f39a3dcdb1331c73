use anyhow::Result;

use mentor_hub::config::HubConfig;
use mentor_hub::db;
use mentor_hub::records::stats::hub_stats;

/// Print record counts in the terminal.
pub fn stats(config: &HubConfig) -> Result<()> {
    let conn = db::open_database(config.resolved_db_path())?;
    let stats = hub_stats(&conn)?;

    println!("Mentor Hub Statistics");
    println!("{}", "=".repeat(40));
    println!("  Mentors:             {}", stats.mentors);
    println!();

    println!("Messages by mentor:");
    for (name, count) in &stats.messages_by_mentor {
        println!("  {:<12} {}", name, count);
    }
    println!();

    println!("Tasks by status:");
    for status in ["pending", "in-progress", "completed"] {
        let count = stats.tasks_by_status.get(status).copied().unwrap_or(0);
        println!("  {:<12} {}", status, count);
    }
    println!();

    println!("Notes by category:");
    if stats.notes_by_category.is_empty() {
        println!("  (none)");
    }
    for (category, count) in &stats.notes_by_category {
        println!("  {:<12} {}", category, count);
    }
    println!();

    println!("Events:                {}", stats.events_total);
    println!("  Upcoming:            {}", stats.events_upcoming);

    Ok(())
}
