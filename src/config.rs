use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_API_BASE_URL;
use crate::notifier::{DOCUMENT_WEBHOOK_VAR, SUMMARY_WEBHOOK_VAR};
use crate::reports::DEFAULT_REPORT_PATH;

/// What the poller does when the report file cannot be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFailurePolicy {
    /// Stop the poller and exit the process.
    Fatal,
    /// Log, skip the upload for this draw and keep polling.
    Log,
}

impl std::str::FromStr for ReportFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatal" => Ok(ReportFailurePolicy::Fatal),
            "log" => Ok(ReportFailurePolicy::Log),
            other => bail!("unknown report failure policy {other:?}, expected \"fatal\" or \"log\""),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub summary_webhook_url: Option<String>,
    pub document_webhook_url: Option<String>,
    pub api_base_url: String,
    pub game_id: String,
    pub database_url: String,
    pub report_path: PathBuf,
    pub poll_interval: Duration,
    pub fetch_failure_backoff: Duration,
    pub report_failure_policy: ReportFailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary_webhook_url: None,
            document_webhook_url: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            game_id: "federal".to_string(),
            database_url: "bancoloteria.sqlite3".to_string(),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            poll_interval: Duration::from_secs(60),
            fetch_failure_backoff: Duration::from_secs(60),
            report_failure_policy: ReportFailurePolicy::Fatal,
        }
    }
}

impl Config {
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let text = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let secs = |key: &str, default: Duration| -> Result<Duration> {
            match text(key) {
                Some(raw) => {
                    let secs: u64 = raw
                        .trim()
                        .parse()
                        .with_context(|| format!("{key} must be a whole number of seconds"))?;
                    Ok(Duration::from_secs(secs))
                }
                None => Ok(default),
            }
        };

        let report_failure_policy = match text("REPORT_FAILURE_POLICY") {
            Some(raw) => raw.parse::<ReportFailurePolicy>().context("invalid REPORT_FAILURE_POLICY")?,
            None => defaults.report_failure_policy,
        };

        Ok(Config {
            summary_webhook_url: text(SUMMARY_WEBHOOK_VAR),
            document_webhook_url: text(DOCUMENT_WEBHOOK_VAR),
            api_base_url: text("LOTTERY_API_BASE_URL").unwrap_or(defaults.api_base_url),
            game_id: text("LOTTERY_GAME").unwrap_or(defaults.game_id),
            database_url: text("LOTTERY_DB_PATH").unwrap_or(defaults.database_url),
            report_path: text("LOTTERY_REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.report_path),
            poll_interval: secs("POLL_INTERVAL_SECS", defaults.poll_interval)?,
            fetch_failure_backoff: secs("FETCH_FAILURE_BACKOFF_SECS", defaults.fetch_failure_backoff)?,
            report_failure_policy,
        })
    }
}

/// Reads `.env` when present, then the process environment.
pub fn load() -> Result<Config> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).context("failed to read .env");
        }
    }

    Config::from_lookup(|key| env::var(key).ok())
}
