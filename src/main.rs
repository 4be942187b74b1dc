use std::path::PathBuf;

use anyhow::Context;
use solvilo_lib::bootstrap::{
    config::{default_data_dir, load_or_default, resolve_config, CONFIG_PATH_VAR},
    tracing::init_tracing_subscriber,
    wire_dependencies,
};
use sv_core::CaseId;
use tracing::{error, info};

const DEMO_CASE_ID: &str = "case_001";

#[tokio::main]
async fn main() {
    // .env is optional
    dotenvy::dotenv().ok();

    if let Err(err) = run().await {
        error!(error = ?err, "solvilo stopped");
        eprintln!("solvilo: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let data_dir = default_data_dir();
    let config_path = std::env::var(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir.join("config.toml"));

    let config = load_or_default(&config_path, data_dir.clone())?;
    let config = resolve_config(config, &data_dir, |key| std::env::var(key).ok());

    init_tracing_subscriber(config.log_dir.as_deref()).context("Failed to initialize tracing")?;
    info!(config = %config_path.display(), mock = config.use_api_mock, "starting solvilo");

    let services = wire_dependencies(&config)?;

    let restored = services.wizard.hydrate().await;
    services.notifications.mount().await;
    services.messages.mount(CaseId::from(DEMO_CASE_ID)).await;

    let draft = services.wizard.draft().await;
    let state = services.wizard.state().await;
    println!("Draft {} ({})", draft.id, if restored { "restored" } else { "new" });
    println!("  step: {}/5", state.step().number());
    println!("  narrative: {} characters", draft.narrative_len());
    println!(
        "  files: {} contract(s), {} evidence",
        draft.contracts.len(),
        draft.evidence.len()
    );
    println!(
        "Notifications: {} ({} unread)",
        services.notifications.items().await.len(),
        services.notifications.unread_count().await
    );
    println!(
        "Messages on {DEMO_CASE_ID}: {} ({} unread)",
        services.messages.items().await.len(),
        services.messages.unread_count().await
    );
    if let Some(err) = services.notifications.error().await {
        println!("  notifications error: {err}");
    }
    if let Some(err) = services.messages.error().await {
        println!("  messages error: {err}");
    }

    services.wizard.settle().await;
    Ok(())
}
