use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One panel of lab values plus the age it was drawn at.
///
/// Units follow the Phenotypic Age calibration: albumin g/dL, creatinine mg/dL,
/// glucose mg/dL, CRP mg/L, MCV fL, RDW %, alkaline phosphatase U/L,
/// WBC 10^3 cells/µL, chronological age in years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerPayload {
    pub albumin: f64,
    pub creatinine: f64,
    pub glucose: f64,
    pub crp: f64,
    pub mcv: f64,
    pub rdw: f64,
    #[serde(alias = "alp")]
    pub alkaline_phosphatase: f64,
    pub wbc: f64,
    pub chronological_age: f64,
}

impl BiomarkerPayload {
    /// Field names and values in declaration order.
    pub fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("albumin", self.albumin),
            ("creatinine", self.creatinine),
            ("glucose", self.glucose),
            ("crp", self.crp),
            ("mcv", self.mcv),
            ("rdw", self.rdw),
            ("alkaline_phosphatase", self.alkaline_phosphatase),
            ("wbc", self.wbc),
            ("chronological_age", self.chronological_age),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub biological_age: f64,
    pub mortality_score: f64,
}

/// A recorded estimation. Only the ledger constructs these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub biomarkers: BiomarkerPayload,
    pub biological_age: f64,
    pub age_gap: f64,
}

impl HistoryEntry {
    pub fn chronological_age(&self) -> f64 {
        self.biomarkers.chronological_age
    }

    pub fn summary(&self) -> AgeSummary {
        AgeSummary {
            biological_age: self.biological_age,
            chronological_age: self.chronological_age(),
            age_gap: self.biological_age - self.chronological_age(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeSummary {
    pub biological_age: f64,
    pub chronological_age: f64,
    pub age_gap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Moderate,
    Low,
    Aligned,
}

impl Severity {
    pub const HIGH_GAP_THRESHOLD: f64 = 5.0;
    pub const LOW_GAP_THRESHOLD: f64 = -3.0;

    /// Buckets an age gap. A missing gap (no history yet) and a NaN gap both
    /// land in `Aligned`, since none of the bucket comparisons hold for them.
    pub fn from_gap(age_gap: Option<f64>) -> Self {
        match age_gap {
            Some(gap) if gap > Self::HIGH_GAP_THRESHOLD => Severity::High,
            Some(gap) if gap > 0.0 => Severity::Moderate,
            Some(gap) if gap < Self::LOW_GAP_THRESHOLD => Severity::Low,
            _ => Severity::Aligned,
        }
    }

    /// Unknown labels fall back to `Moderate`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Severity::High,
            "low" => Severity::Low,
            "aligned" => Severity::Aligned,
            _ => Severity::Moderate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Moderate => "moderate",
            Severity::Low => "low",
            Severity::Aligned => "aligned",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nutrition,
    Exercise,
    Sleep,
    Stress,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Nutrition,
        Category::Exercise,
        Category::Sleep,
        Category::Stress,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::Nutrition => "Nutrition",
            Category::Exercise => "Exercise",
            Category::Sleep => "Sleep",
            Category::Stress => "Stress",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub nutrition: Vec<String>,
    pub exercise: Vec<String>,
    pub sleep: Vec<String>,
    pub stress: Vec<String>,
}

impl RecommendationSet {
    pub fn items(&self, category: Category) -> &[String] {
        match category {
            Category::Nutrition => &self.nutrition,
            Category::Exercise => &self.exercise,
            Category::Sleep => &self.sleep,
            Category::Stress => &self.stress,
        }
    }

    pub(crate) fn extend<'a>(&mut self, category: Category, items: impl IntoIterator<Item = &'a str>) {
        let list = match category {
            Category::Nutrition => &mut self.nutrition,
            Category::Exercise => &mut self.exercise,
            Category::Sleep => &mut self.sleep,
            Category::Stress => &mut self.stress,
        };
        list.extend(items.into_iter().map(str::to_string));
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL.into_iter().map(move |c| (c, self.items(c)))
    }

    pub fn total_items(&self) -> usize {
        self.iter().map(|(_, items)| items.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: usize,
    pub y: f64,
}

/// Plot-ready view of the history. The x-axis is the entry index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub biological: Vec<ChartPoint>,
    pub chronological: Vec<ChartPoint>,
    pub x_max: usize,
    pub y_min: f64,
    pub y_max: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        let cases = [
            (5.0, Severity::Moderate),
            (5.01, Severity::High),
            (0.0, Severity::Aligned),
            (0.01, Severity::Moderate),
            (-3.0, Severity::Aligned),
            (-3.01, Severity::Low),
        ];
        for (gap, expected) in cases {
            assert_eq!(Severity::from_gap(Some(gap)), expected, "gap {}", gap);
        }
    }

    #[test]
    fn test_missing_or_nan_gap_is_aligned() {
        assert_eq!(Severity::from_gap(None), Severity::Aligned);
        assert_eq!(Severity::from_gap(Some(f64::NAN)), Severity::Aligned);
    }

    #[test]
    fn test_unknown_label_falls_back_to_moderate() {
        assert_eq!(Severity::from_label("HIGH"), Severity::High);
        assert_eq!(Severity::from_label("aligned"), Severity::Aligned);
        assert_eq!(Severity::from_label("extreme"), Severity::Moderate);
        assert_eq!(Severity::from_label(""), Severity::Moderate);
    }

    #[test]
    fn test_payload_accepts_alp_alias() {
        let json = r#"{
            "albumin": 4.2, "creatinine": 0.9, "glucose": 95.0, "crp": 1.0,
            "mcv": 88.0, "rdw": 13.0, "alp": 65.0, "wbc": 6.5,
            "chronological_age": 40.0
        }"#;
        let payload: BiomarkerPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.alkaline_phosphatase, 65.0);
    }

    #[test]
    fn test_fields_follow_declaration_order() {
        let payload = BiomarkerPayload {
            albumin: 1.0,
            creatinine: 2.0,
            glucose: 3.0,
            crp: 4.0,
            mcv: 5.0,
            rdw: 6.0,
            alkaline_phosphatase: 7.0,
            wbc: 8.0,
            chronological_age: 9.0,
        };
        let values: Vec<f64> = payload.fields().iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(payload.fields()[6].0, "alkaline_phosphatase");
    }
}
