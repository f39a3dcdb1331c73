pub mod doctor;
pub mod stats;

use std::sync::Arc;

use anyhow::{Context, Result};

use mentor_hub::config::HubConfig;
use mentor_hub::db;
use mentor_hub::generator::ollama::OllamaClient;
use mentor_hub::generator::responder::MentorResponder;
use mentor_hub::generator::TextGenerator;
use mentor_hub::web::{self, AppState};

/// Open the database, wire the generator, and run the web server until ctrl-c.
pub async fn serve(config: HubConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = db::open_database(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    tracing::info!(db = %db_path.display(), "database ready");

    let generator: Arc<dyn TextGenerator> = Arc::new(OllamaClient::new(&config.generator));
    let responder = MentorResponder::new(generator, &config.generator);
    tracing::info!(
        url = %config.generator.base_url,
        model = %config.generator.model,
        backups = ?config.generator.backup_models,
        "generation service configured"
    );

    let state = AppState::new(conn, responder).context("failed to build application state")?;
    web::serve(state, &config.bind_addr()).await
}
