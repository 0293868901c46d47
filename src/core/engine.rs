use crate::core::estimator::estimate;
use crate::core::ledger::HistoryLedger;
use crate::core::recommend::recommend;
use crate::domain::model::{AgeSummary, BiomarkerPayload, HistoryEntry, RecommendationSet, Severity};
use crate::domain::ports::{Clock, SystemClock};
use crate::utils::error::Result;
use serde::Serialize;

/// Everything one submission produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub entry: HistoryEntry,
    pub summary: AgeSummary,
    pub severity: Severity,
    pub recommendations: RecommendationSet,
}

pub struct AgeAlignEngine<C: Clock = SystemClock> {
    ledger: HistoryLedger<C>,
}

impl AgeAlignEngine<SystemClock> {
    pub fn new() -> Self {
        Self::with_ledger(HistoryLedger::new())
    }
}

impl Default for AgeAlignEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> AgeAlignEngine<C> {
    pub fn with_ledger(ledger: HistoryLedger<C>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &HistoryLedger<C> {
        &self.ledger
    }

    /// Runs one estimate -> append -> recommend cycle.
    pub fn submit(&mut self, payload: BiomarkerPayload) -> Result<Assessment> {
        tracing::debug!("Estimating biological age for payload: {:?}", payload);

        let result = match estimate(&payload) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Estimation rejected: {}", e);
                return Err(e);
            }
        };
        tracing::debug!(
            "Mortality score {:.5} -> biological age {:.2}",
            result.mortality_score,
            result.biological_age
        );

        let entry = self.ledger.append(payload, result);
        let summary = entry.summary();
        let severity = Severity::from_gap(Some(summary.age_gap));
        let recommendations = recommend(Some(summary.age_gap), Some(&entry));

        tracing::info!(
            "Recorded entry #{}: biological age {:.1}, gap {:+.1} ({})",
            self.ledger.len(),
            summary.biological_age,
            summary.age_gap,
            severity
        );

        Ok(Assessment {
            entry,
            summary,
            severity,
            recommendations,
        })
    }

    /// Submits in order and stops at the first failure. Entries accepted
    /// before the failure stay in the ledger.
    pub fn submit_all<I>(&mut self, payloads: I) -> Result<Vec<Assessment>>
    where
        I: IntoIterator<Item = BiomarkerPayload>,
    {
        let mut assessments = Vec::new();
        for (index, payload) in payloads.into_iter().enumerate() {
            tracing::debug!("Submitting entry {}", index + 1);
            assessments.push(self.submit(payload)?);
        }
        Ok(assessments)
    }

    /// Guidance for the current state of the ledger, including the empty state.
    pub fn current_recommendations(&self) -> RecommendationSet {
        let gap = self.ledger.summary().map(|s| s.age_gap);
        recommend(gap, self.ledger.latest())
    }
}
