//! # dmo-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the DMO classification API.
//! Binds to configurable port (default 8080).

use anyhow::Context;
use dmo_advisor::{Advisor, AdvisorConfig, ConfigError};
use dmo_api::state::{AppConfig, AppState};
use dmo_classify::SuggestionRules;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Build configuration from environment.
    let config = AppConfig::from_env();

    // Initialize structured tracing.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let rules = match &config.rules_path {
        Some(path) => SuggestionRules::from_path(path)
            .with_context(|| format!("loading suggestion rules from {}", path.display()))?,
        None => SuggestionRules::builtin().clone(),
    };

    // Advisor is optional; absent means the advice endpoint returns 503.
    let advisor = match AdvisorConfig::from_env() {
        Ok(advisor_config) => {
            let advisor = Advisor::from_config(&advisor_config).map_err(|e| {
                tracing::error!("Failed to create advisory client: {e}");
                e
            })?;
            tracing::info!(model = advisor.model(), "advisory client configured");
            Some(advisor)
        }
        Err(ConfigError::MissingApiKey) => {
            tracing::warn!("Advisory client not configured. Advice endpoint will return 503.");
            None
        }
        Err(e) => return Err(e).context("invalid advisory configuration"),
    };

    let state = AppState::with_services(rules, advisor);
    let app = dmo_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("DMO classification API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
