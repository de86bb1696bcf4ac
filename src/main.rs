//! Vacina API - Entry Point
//!
//! Startar HTTP-tjänsten för vaccinationsregistret.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use vacina_api::{api, Database, ServerSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ServerSettings::load()?;

    // Initiera logging, RUST_LOG går före inställningsfilen
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .context("Ogiltig loggnivå")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::info!("Startar Vacina API v{}", env!("CARGO_PKG_VERSION"));

    let db = Database::open(&settings.database_path)
        .with_context(|| format!("Kunde inte öppna {}", settings.database_path.display()))?;
    db.migrate()?;
    tracing::info!("Databas: {}", settings.database_path.display());

    let addr = settings.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Kunde inte lyssna på {}", addr))?;
    tracing::info!("Lyssnar på http://{}", addr);

    axum::serve(listener, api::app(db, &settings))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Avslutar");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Kunde inte lyssna efter Ctrl+C: {}", e);
    }
}
