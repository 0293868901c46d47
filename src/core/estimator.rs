//! Phenotypic Age (Levine et al., 2018).
//!
//! A fixed-coefficient linear mortality score over nine inputs, pushed through
//! a log-linear transform onto the age scale. Coefficients are part of the
//! published model and are not configurable.

use crate::domain::model::{BiomarkerPayload, EstimationResult};
use crate::utils::error::{AgeAlignError, Result};
use crate::utils::validation::{validate_finite, validate_strictly_positive, Validate};

const INTERCEPT: f64 = -19.907;
const ALBUMIN: f64 = -0.0336;
const CREATININE: f64 = 0.0095;
const GLUCOSE: f64 = 0.1953;
const LN_CRP: f64 = 0.0954;
const MCV: f64 = -0.0120;
const RDW: f64 = 0.0268;
const ALKALINE_PHOSPHATASE: f64 = 0.3306;
const WBC: f64 = 0.00188;
const CHRONOLOGICAL_AGE: f64 = 0.0554;

const AGE_OFFSET: f64 = 141.5;
const SCORE_SHIFT: f64 = 0.00553;
const SCORE_SCALE: f64 = 0.09165;

impl Validate for BiomarkerPayload {
    /// Reports the first offending field in declaration order.
    fn validate(&self) -> Result<()> {
        for (field, value) in self.fields() {
            if field == "crp" {
                validate_strictly_positive(field, value)?;
            } else {
                validate_finite(field, value)?;
            }
        }
        Ok(())
    }
}

/// Linear mortality score, evaluated term by term in the published order.
pub fn mortality_score(p: &BiomarkerPayload) -> f64 {
    INTERCEPT + ALBUMIN * p.albumin
        + CREATININE * p.creatinine
        + GLUCOSE * p.glucose
        + LN_CRP * p.crp.ln()
        + MCV * p.mcv
        + RDW * p.rdw
        + ALKALINE_PHOSPHATASE * p.alkaline_phosphatase
        + WBC * p.wbc
        + CHRONOLOGICAL_AGE * p.chronological_age
}

/// Estimates biological age from a validated payload.
///
/// # Errors
/// - `InvalidInput` if any field is non-finite or `crp <= 0`.
/// - `DomainComputation` if `mortality_score + 0.00553 <= 0`, where the log is undefined.
pub fn estimate(payload: &BiomarkerPayload) -> Result<EstimationResult> {
    payload.validate()?;

    let score = mortality_score(payload);
    let shifted = score + SCORE_SHIFT;
    if shifted.is_nan() || shifted <= 0.0 {
        return Err(AgeAlignError::DomainComputation {
            mortality_score: score,
        });
    }

    let biological_age = AGE_OFFSET + shifted.ln() / SCORE_SCALE;
    if !biological_age.is_finite() {
        return Err(AgeAlignError::DomainComputation {
            mortality_score: score,
        });
    }

    Ok(EstimationResult {
        biological_age,
        mortality_score: score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_payload() -> BiomarkerPayload {
        BiomarkerPayload {
            albumin: 4.2,
            creatinine: 0.9,
            glucose: 95.0,
            crp: 1.0,
            mcv: 88.0,
            rdw: 13.0,
            alkaline_phosphatase: 65.0,
            wbc: 6.5,
            chronological_age: 40.0,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        let rel = ((actual - expected) / expected).abs();
        assert!(rel <= 1e-6, "expected {}, got {} (rel err {})", expected, actual, rel);
    }

    #[test]
    fn test_reference_panel_matches_direct_evaluation() {
        let score = -19.907 - 0.0336 * 4.2 + 0.0095 * 0.9 + 0.1953 * 95.0
            + 0.0954 * 1.0_f64.ln()
            - 0.0120 * 88.0
            + 0.0268 * 13.0
            + 0.3306 * 65.0
            + 0.00188 * 6.5
            + 0.0554 * 40.0;
        let expected = 141.5 + (score + 0.00553).ln() / 0.09165;

        let result = estimate(&reference_payload()).unwrap();
        assert_close(result.mortality_score, score);
        assert_close(result.biological_age, expected);
    }

    #[test]
    fn test_increasing_risk_markers_raise_biological_age() {
        let base = reference_payload();
        let base_age = estimate(&base).unwrap().biological_age;

        let bumped: [(&str, BiomarkerPayload); 7] = [
            ("creatinine", BiomarkerPayload { creatinine: base.creatinine + 1.0, ..base }),
            ("glucose", BiomarkerPayload { glucose: base.glucose + 1.0, ..base }),
            ("crp", BiomarkerPayload { crp: base.crp * 2.0, ..base }),
            ("rdw", BiomarkerPayload { rdw: base.rdw + 1.0, ..base }),
            (
                "alkaline_phosphatase",
                BiomarkerPayload { alkaline_phosphatase: base.alkaline_phosphatase + 1.0, ..base },
            ),
            ("wbc", BiomarkerPayload { wbc: base.wbc + 1.0, ..base }),
            (
                "chronological_age",
                BiomarkerPayload { chronological_age: base.chronological_age + 1.0, ..base },
            ),
        ];

        for (field, payload) in bumped {
            let result = estimate(&payload).unwrap();
            assert!(
                result.biological_age > base_age,
                "raising {} should raise biological age",
                field
            );
        }
    }

    #[test]
    fn test_increasing_protective_markers_lower_biological_age() {
        let base = reference_payload();
        let base_age = estimate(&base).unwrap().biological_age;

        let albumin = estimate(&BiomarkerPayload { albumin: base.albumin + 1.0, ..base }).unwrap();
        let mcv = estimate(&BiomarkerPayload { mcv: base.mcv + 1.0, ..base }).unwrap();

        assert!(albumin.biological_age < base_age);
        assert!(mcv.biological_age < base_age);
    }

    #[test]
    fn test_score_below_shift_is_domain_error() {
        let payload = BiomarkerPayload {
            glucose: 0.0,
            alkaline_phosphatase: 0.0,
            ..reference_payload()
        };
        assert!(mortality_score(&payload) + 0.00553 <= 0.0);

        let err = estimate(&payload).unwrap_err();
        assert!(matches!(err, AgeAlignError::DomainComputation { mortality_score } if mortality_score < 0.0));
    }

    #[test]
    fn test_score_at_shift_boundary_never_yields_nan() {
        // Solve for the glucose value that lands the score on -0.00553.
        let base = BiomarkerPayload { glucose: 0.0, ..reference_payload() };
        let glucose = (-0.00553 - mortality_score(&base)) / 0.1953;
        let payload = BiomarkerPayload { glucose, ..base };

        let shifted = mortality_score(&payload) + 0.00553;
        if shifted <= 0.0 {
            assert!(matches!(
                estimate(&payload),
                Err(AgeAlignError::DomainComputation { .. })
            ));
        } else {
            // Rounding landed a hair above zero; the result must still be finite.
            assert!(estimate(&payload).unwrap().biological_age.is_finite());
        }
    }

    #[test]
    fn test_non_positive_crp_is_invalid_input() {
        for crp in [0.0, -1.0] {
            let payload = BiomarkerPayload { crp, ..reference_payload() };
            match estimate(&payload) {
                Err(AgeAlignError::InvalidInput { field, .. }) => assert_eq!(field, "crp"),
                other => panic!("expected InvalidInput for crp={}, got {:?}", crp, other),
            }
        }
    }

    #[test]
    fn test_non_finite_fields_are_invalid_input() {
        for glucose in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let payload = BiomarkerPayload { glucose, ..reference_payload() };
            match estimate(&payload) {
                Err(AgeAlignError::InvalidInput { field, .. }) => assert_eq!(field, "glucose"),
                other => panic!("expected InvalidInput, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_first_invalid_field_is_reported() {
        let payload = BiomarkerPayload {
            albumin: f64::NAN,
            crp: 0.0,
            ..reference_payload()
        };
        match estimate(&payload) {
            Err(AgeAlignError::InvalidInput { field, .. }) => assert_eq!(field, "albumin"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
