pub mod engine;
pub mod estimator;
pub mod ledger;
pub mod recommend;

pub use crate::domain::model::{
    AgeSummary, BiomarkerPayload, Category, EstimationResult, HistoryEntry, RecommendationSet,
    Severity,
};
pub use crate::domain::ports::{Clock, ConfigProvider, Storage, SystemClock};
pub use crate::utils::error::Result;
