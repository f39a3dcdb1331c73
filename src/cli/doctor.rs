//! CLI `doctor` command: database diagnostics plus a generation-service check.

use anyhow::{Context, Result};

use mentor_hub::config::HubConfig;
use mentor_hub::db;
use mentor_hub::generator::ollama::OllamaClient;
use mentor_hub::generator::TextGenerator;

/// Run diagnostics and print a health report.
pub async fn doctor(config: &HubConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    println!("Mentor Hub Health Report");
    println!("========================");
    println!();

    if db_path.exists() {
        let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

        let conn = db::open_database(&db_path)
            .context("failed to open database (may be corrupt)")?;
        let report = db::check_database_health(&conn).context("failed to run health check")?;

        println!("Database:          {}", db_path.display());
        println!("File size:         {}", format_bytes(file_size));
        println!("Schema version:    {}", report.schema_version);
        println!();
        println!("Row counts:");
        println!("  Mentors:         {}", report.mentor_count);
        println!("  Chat messages:   {}", report.message_count);
        println!("  Tasks:           {}", report.task_count);
        println!("  Notes:           {}", report.note_count);
        println!("  Events:          {}", report.event_count);
        println!();
        if report.integrity_ok {
            println!("Integrity check:   PASSED");
        } else {
            println!("Integrity check:   FAILED ({})", report.integrity_details);
            println!();
            println!("Recovery: restore a backup over {}", db_path.display());
            println!("or delete it and let `mentor-hub serve` recreate an empty one.");
        }
    } else {
        println!("Database:          not found at {}", db_path.display());
        println!("Run `mentor-hub serve` to create and seed it.");
    }

    println!();
    println!("Generation service: {}", config.generator.base_url);
    println!("  Primary model:   {}", config.generator.model);
    if !config.generator.backup_models.is_empty() {
        println!("  Backup models:   {}", config.generator.backup_models.join(", "));
    }

    let client = OllamaClient::new(&config.generator);
    match client.list_models().await {
        Ok(models) => {
            println!("  Status:          reachable ({} models)", models.len());
            if !models.iter().any(|m| m == &config.generator.model) {
                println!(
                    "  WARNING: primary model not installed. Run `ollama pull {}`.",
                    config.generator.model
                );
            }
        }
        Err(e) => {
            println!("  Status:          UNREACHABLE ({e})");
            println!("  Chat will answer with canned fallback replies until it is up.");
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
