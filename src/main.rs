use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use lottery_lib::connection::conn;
use lottery_lib::database::count_draw_records;
use lottery_lib::{Poller, config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!(game = %config.game_id, "Let's watch the lottery draws.");

    let db_conn = conn(&config.database_url)
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    match count_draw_records(&db_conn) {
        Ok(count) => tracing::info!(database = %config.database_url, rows = count, "database ready"),
        Err(e) => tracing::warn!(error = %e, "could not count stored results"),
    }

    if config.summary_webhook_url.is_none() {
        tracing::warn!("summary webhook not configured, summaries will be skipped");
    }
    if config.document_webhook_url.is_none() {
        tracing::warn!("document webhook not configured, reports will not be uploaded");
    }

    let poller = Poller::new(&config, db_conn);

    poller.run().await.inspect_err(|e| {
        tracing::error!("poller stopped: {:?}", e);
    })?;

    Ok(())
}
