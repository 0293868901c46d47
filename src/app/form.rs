//! Text-field input collection.
//!
//! Raw form values are parsed strictly before anything reaches the estimator:
//! blank, unparseable or non-finite text is rejected, and CRP must be positive.

use crate::domain::model::BiomarkerPayload;
use crate::utils::error::{AgeAlignError, Result};
use serde::{Deserialize, Serialize};

pub const INVALID_NUMBERS_MESSAGE: &str = "Please provide valid numbers for all fields.";
pub const NON_POSITIVE_CRP_MESSAGE: &str =
    "CRP must be greater than 0 to compute the formula (logarithm).";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomarkerForm {
    pub albumin: Option<String>,
    pub creatinine: Option<String>,
    pub glucose: Option<String>,
    pub crp: Option<String>,
    pub mcv: Option<String>,
    pub rdw: Option<String>,
    #[serde(alias = "alp")]
    pub alkaline_phosphatase: Option<String>,
    pub wbc: Option<String>,
    pub chronological_age: Option<String>,
}

impl BiomarkerForm {
    pub fn parse(&self) -> Result<BiomarkerPayload> {
        let payload = BiomarkerPayload {
            albumin: parse_field("albumin", &self.albumin)?,
            creatinine: parse_field("creatinine", &self.creatinine)?,
            glucose: parse_field("glucose", &self.glucose)?,
            crp: parse_field("crp", &self.crp)?,
            mcv: parse_field("mcv", &self.mcv)?,
            rdw: parse_field("rdw", &self.rdw)?,
            alkaline_phosphatase: parse_field("alkaline_phosphatase", &self.alkaline_phosphatase)?,
            wbc: parse_field("wbc", &self.wbc)?,
            chronological_age: parse_field("chronological_age", &self.chronological_age)?,
        };

        if payload.crp <= 0.0 {
            return Err(AgeAlignError::invalid_input("crp", NON_POSITIVE_CRP_MESSAGE));
        }

        Ok(payload)
    }
}

fn parse_field(field: &str, raw: &Option<String>) -> Result<f64> {
    let value = raw
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite());

    value.ok_or_else(|| AgeAlignError::invalid_input(field, INVALID_NUMBERS_MESSAGE))
}
