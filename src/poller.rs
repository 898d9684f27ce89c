use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::api::fetch_draw_result;
use crate::config::{Config, ReportFailurePolicy};
use crate::database::save_draw_result;
use crate::error::{Error, Result};
use crate::notifier::WebhookNotifier;
use crate::reports::generate_report;
use crate::types::DrawResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The fetch failed; persist and notify were skipped.
    FetchFailed,
    Completed { draw_number: i64, new_draw: bool },
}

/// Drives the fetch, persist and notify cycle for one game.
///
/// `last_notified_draw` lives only in memory, so the first draw seen after a
/// restart always produces a document notification.
pub struct Poller {
    conn: Connection,
    client: reqwest::Client,
    notifier: WebhookNotifier,
    api_base_url: String,
    game_id: String,
    report_path: PathBuf,
    poll_interval: Duration,
    fetch_failure_backoff: Duration,
    report_failure_policy: ReportFailurePolicy,
    last_notified_draw: Option<i64>,
}

impl Poller {
    pub fn new(config: &Config, conn: Connection) -> Self {
        let client = reqwest::Client::new();
        let notifier = WebhookNotifier::new(
            client.clone(),
            config.summary_webhook_url.clone(),
            config.document_webhook_url.clone(),
        );

        Self {
            conn,
            client,
            notifier,
            api_base_url: config.api_base_url.clone(),
            game_id: config.game_id.clone(),
            report_path: config.report_path.clone(),
            poll_interval: config.poll_interval,
            fetch_failure_backoff: config.fetch_failure_backoff,
            report_failure_policy: config.report_failure_policy,
            last_notified_draw: None,
        }
    }

    pub fn with_last_notified_draw(mut self, draw_number: Option<i64>) -> Self {
        self.last_notified_draw = draw_number;
        self
    }

    pub fn last_notified_draw(&self) -> Option<i64> {
        self.last_notified_draw
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn delay_after(&self, outcome: &CycleOutcome) -> Duration {
        match outcome {
            CycleOutcome::FetchFailed => self.fetch_failure_backoff,
            CycleOutcome::Completed { .. } => self.poll_interval,
        }
    }

    /// Runs one cycle. Only a fatal report failure is returned as an error;
    /// every other failure is logged and the cycle moves on.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let result =
            match fetch_draw_result(&self.client, &self.api_base_url, &self.game_id).await {
                Ok(result) => result,
                Err(e) => {
                    error!(game = %self.game_id, error = %e, "failed to fetch lottery result");
                    return Ok(CycleOutcome::FetchFailed);
                }
            };
        info!(game = %self.game_id, draw_number = result.draw_number, "fetched lottery result");

        match save_draw_result(&self.conn, &result) {
            Ok(id) => info!(id, draw_number = result.draw_number, "saved lottery result"),
            Err(e) => error!(draw_number = result.draw_number, error = %e, "failed to save lottery result"),
        }

        if let Err(e) = self.notifier.send_summary(&result).await {
            warn!(draw_number = result.draw_number, error = %e, "failed to send summary notification");
        }

        let new_draw = self.last_notified_draw != Some(result.draw_number);
        if new_draw {
            self.notify_new_draw(&result).await?;
        }

        Ok(CycleOutcome::Completed {
            draw_number: result.draw_number,
            new_draw,
        })
    }

    async fn notify_new_draw(&mut self, result: &DrawResult) -> Result<()> {
        match generate_report(result, &self.report_path) {
            Ok(path) => {
                info!(path = %path.display(), draw_number = result.draw_number, "🎰 report generated");
                if let Err(e) = self.notifier.send_document(&path).await {
                    warn!(draw_number = result.draw_number, error = %e, "failed to send report document");
                }
            }
            Err(e) => match self.report_failure_policy {
                ReportFailurePolicy::Fatal => {
                    error!(draw_number = result.draw_number, error = %e, "failed to generate report");
                    return Err(Error::Fatal(Box::new(e)));
                }
                ReportFailurePolicy::Log => {
                    error!(
                        draw_number = result.draw_number,
                        error = %e,
                        "failed to generate report, skipping document upload"
                    );
                }
            },
        }

        self.last_notified_draw = Some(result.draw_number);
        Ok(())
    }

    /// Polls until a fatal error occurs.
    pub async fn run(mut self) -> Result<()> {
        loop {
            let outcome = self.run_cycle().await?;
            let delay = self.delay_after(&outcome);
            tracing::debug!(?outcome, delay_secs = delay.as_secs(), "sleeping until next cycle");
            tokio::time::sleep(delay).await;
        }
    }
}
