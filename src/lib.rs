pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::SessionConfig;

pub use adapters::LocalStorage;
pub use app::export::HistoryExporter;
pub use crate::core::{
    engine::{AgeAlignEngine, Assessment},
    estimator::estimate,
    ledger::{HistoryLedger, SharedLedger},
    recommend::recommend,
};
pub use utils::error::{AgeAlignError, Result};
