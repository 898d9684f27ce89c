pub mod api;
pub mod config;
pub mod connection;
pub mod database;
pub mod error;
pub mod notifier;
pub mod poller;
pub mod reports;
pub mod types;
pub mod utils;

pub use config::{Config, ReportFailurePolicy};
pub use error::{Error, Result};
pub use poller::{CycleOutcome, Poller};
pub use types::{DrawRecordRow, DrawResult};
