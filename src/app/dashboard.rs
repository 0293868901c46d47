//! Terminal rendering of the summary cards, progress table and guidance.

use crate::domain::model::{AgeSummary, ChartSeries, RecommendationSet};

pub const EMPTY_HISTORY_MESSAGE: &str = "Add biomarker entries to track your progress over time.";
const MISSING_VALUE: &str = "–";

fn years(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1} yrs", v),
        None => MISSING_VALUE.to_string(),
    }
}

fn gap_subtitle(gap: Option<f64>) -> &'static str {
    match gap {
        Some(g) if g > 0.0 => "Biological > Chronological",
        Some(_) => "Biological < Chronological",
        None => "",
    }
}

/// The three summary cards. Absent values render as a dash.
pub fn format_summary(summary: Option<&AgeSummary>) -> String {
    let bio = summary.map(|s| s.biological_age);
    let chrono = summary.map(|s| s.chronological_age);
    let gap = summary.map(|s| s.age_gap);

    let mut out = String::new();
    out.push_str("=== Your Aging Dashboard ===\n");
    out.push_str(&format!(
        "{:<18} {:>10}  {}\n",
        "Biological Age",
        years(bio),
        "Calculated with Phenotypic Age"
    ));
    out.push_str(&format!(
        "{:<18} {:>10}  {}\n",
        "Chronological Age",
        years(chrono),
        "From your input"
    ));
    out.push_str(&format!(
        "{:<18} {:>10}  {}\n",
        "Age Gap",
        years(gap),
        gap_subtitle(gap)
    ));
    out
}

/// One row per entry, in submission order.
pub fn format_progress(series: Option<&ChartSeries>) -> String {
    let Some(series) = series else {
        return format!("{}\n", EMPTY_HISTORY_MESSAGE);
    };

    let mut out = String::new();
    out.push_str("Progress:\n");
    out.push_str(&format!("{:>4}  {:>12}  {:>14}\n", "#", "Biological", "Chronological"));
    for (bio, chrono) in series.biological.iter().zip(&series.chronological) {
        out.push_str(&format!("{:>4}  {:>12.1}  {:>14.1}\n", bio.x + 1, bio.y, chrono.y));
    }
    out.push_str(&format!(
        "Range: {:.1} to {:.1} yrs across {} entries\n",
        series.y_min,
        series.y_max,
        series.biological.len()
    ));
    out
}

pub fn format_recommendations(set: &RecommendationSet) -> String {
    let mut out = String::new();
    out.push_str("=== Personalized Recommendations ===\n");
    for (category, items) in set.iter() {
        out.push_str(&format!("\n{}\n", category.title()));
        for item in items {
            out.push_str(&format!("  - {}\n", item));
        }
    }
    out
}
