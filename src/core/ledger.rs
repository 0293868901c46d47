//! Append-only history of estimations.
//!
//! `HistoryLedger` is the single-owner form used by the engine; `SharedLedger`
//! wraps it for hosts with more than one writer.

use crate::core::estimator::estimate;
use crate::domain::model::{
    AgeSummary, BiomarkerPayload, ChartPoint, ChartSeries, EstimationResult, HistoryEntry,
};
use crate::domain::ports::{Clock, SystemClock};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

const CHART_Y_PADDING: f64 = 2.0;

#[derive(Debug)]
pub struct HistoryLedger<C: Clock = SystemClock> {
    entries: Vec<HistoryEntry>,
    clock: C,
}

impl HistoryLedger<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for HistoryLedger<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> HistoryLedger<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: Vec::new(),
            clock,
        }
    }

    /// Records an estimation made for `biomarkers` and returns the new entry.
    pub fn append(&mut self, biomarkers: BiomarkerPayload, result: EstimationResult) -> HistoryEntry {
        let entry = HistoryEntry {
            recorded_at: self.clock.now(),
            biomarkers,
            biological_age: result.biological_age,
            age_gap: result.biological_age - biomarkers.chronological_age,
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Estimates and appends in one step. Nothing is appended on failure.
    pub fn record(&mut self, biomarkers: BiomarkerPayload) -> Result<HistoryEntry> {
        let result = estimate(&biomarkers)?;
        Ok(self.append(biomarkers, result))
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn summary(&self) -> Option<AgeSummary> {
        self.latest().map(HistoryEntry::summary)
    }

    pub fn history_as_sequence(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn chart_series(&self) -> Option<ChartSeries> {
        chart_series(&self.entries)
    }
}

/// Index-on-x series for both ages, with y bounds padded by two years.
pub fn chart_series(entries: &[HistoryEntry]) -> Option<ChartSeries> {
    if entries.is_empty() {
        return None;
    }

    let biological: Vec<ChartPoint> = entries
        .iter()
        .enumerate()
        .map(|(x, e)| ChartPoint { x, y: e.biological_age })
        .collect();
    let chronological: Vec<ChartPoint> = entries
        .iter()
        .enumerate()
        .map(|(x, e)| ChartPoint { x, y: e.chronological_age() })
        .collect();

    let ys = biological.iter().chain(chronological.iter()).map(|p| p.y);
    let (lo, hi) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });

    Some(ChartSeries {
        biological,
        chronological,
        x_max: (entries.len() - 1).max(1),
        y_min: lo - CHART_Y_PADDING,
        y_max: hi + CHART_Y_PADDING,
    })
}

/// Cloneable handle for concurrent hosts. Appends serialize on the write lock,
/// so history order is lock acquisition order; reads hand out owned copies.
#[derive(Debug)]
pub struct SharedLedger<C: Clock = SystemClock> {
    inner: Arc<RwLock<HistoryLedger<C>>>,
}

impl<C: Clock> Clone for SharedLedger<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedLedger<C> {
    pub fn new(ledger: HistoryLedger<C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub async fn append(&self, biomarkers: BiomarkerPayload, result: EstimationResult) -> HistoryEntry {
        self.inner.write().await.append(biomarkers, result)
    }

    /// Estimation runs before the write lock is taken.
    pub async fn record(&self, biomarkers: BiomarkerPayload) -> Result<HistoryEntry> {
        let result = estimate(&biomarkers)?;
        Ok(self.append(biomarkers, result).await)
    }

    pub async fn latest(&self) -> Option<HistoryEntry> {
        self.inner.read().await.latest().cloned()
    }

    pub async fn summary(&self) -> Option<AgeSummary> {
        self.inner.read().await.summary()
    }

    pub async fn snapshot(&self) -> Vec<HistoryEntry> {
        self.inner.read().await.history_as_sequence().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
