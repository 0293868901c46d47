//! Guidance selection.
//!
//! Every set is built the same way: the baseline block, then the block for
//! the severity bucket, then any lab nudges that fire on the latest entry.

use crate::domain::model::{BiomarkerPayload, Category, HistoryEntry, RecommendationSet, Severity};

/// Guidance lines for each category, in display order.
struct GuidanceBlock {
    nutrition: &'static [&'static str],
    exercise: &'static [&'static str],
    sleep: &'static [&'static str],
    stress: &'static [&'static str],
}

impl GuidanceBlock {
    fn lines(&self, category: Category) -> &'static [&'static str] {
        match category {
            Category::Nutrition => self.nutrition,
            Category::Exercise => self.exercise,
            Category::Sleep => self.sleep,
            Category::Stress => self.stress,
        }
    }
}

const BASELINE: GuidanceBlock = GuidanceBlock {
    nutrition: &[
        "Prioritize whole foods: vegetables, legumes, fruits, nuts, and lean proteins.",
        "Aim for 25–35g fiber/day and limit added sugars.",
    ],
    exercise: &[
        "Mix cardio (Zone 2) 150–180 min/week with 2–3 strength sessions.",
        "Accumulate 7–8k steps/day minimum.",
    ],
    sleep: &[
        "Target 7–9 hours with a consistent sleep/wake schedule.",
        "Keep bedroom cool, dark, and screen-free 60 minutes before bed.",
    ],
    stress: &[
        "Practice 5–10 minutes of breathwork or mindfulness daily.",
        "Schedule brief recovery breaks across your day.",
    ],
};

const HIGH: GuidanceBlock = GuidanceBlock {
    nutrition: &[
        "Increase omega-3 intake (e.g., 2 servings fatty fish/week or algae oil).",
        "Cap refined carbs; choose low-glycemic options (oats, beans, berries).",
    ],
    exercise: &[
        "Add 1 HIIT session/week (e.g., 4x4min) if medically appropriate.",
        "Prioritize progressive overload on compound lifts (squat, hinge, push, pull).",
    ],
    sleep: &[
        "Anchor wake time; avoid caffeine after midday; limit alcohol.",
        "Trial magnesium glycinate (consult clinician) and wind-down routine.",
    ],
    stress: &[
        "Daily 10–15 min of meditation or yoga; consider nature exposure.",
        "Reduce evening news/social media to lower arousal before sleep.",
    ],
};

const MODERATE: GuidanceBlock = GuidanceBlock {
    nutrition: &["Dial up protein to ~1.2–1.6 g/kg/day to support body composition."],
    exercise: &["Progressively extend Zone 2 sessions to 45–60 minutes."],
    sleep: &["Maintain a 90-minute wind-down with low light and stretching."],
    stress: &["Use a 2–minute physiological sigh during stressful moments."],
};

const LOW: GuidanceBlock = GuidanceBlock {
    nutrition: &["Maintain current plan; perform a weekly meal prep to stay consistent."],
    exercise: &["Add mobility work (10 min/day) to support recovery and form."],
    sleep: &["Protect 8 hours in bed; avoid late meals within 3 hours of sleep."],
    stress: &["Try a gratitude journal at night to improve sleep onset."],
};

const ALIGNED: GuidanceBlock = GuidanceBlock {
    nutrition: &["Keep balanced meals; reassess biomarkers every 4–8 weeks."],
    exercise: &["Alternate cardio intensities; respect rest days."],
    sleep: &["Stay consistent; maintain a relaxing pre-sleep ritual."],
    stress: &["Micro-breaks every 90 minutes; quick walks help reset."],
};

fn block_for(severity: Severity) -> &'static GuidanceBlock {
    match severity {
        Severity::High => &HIGH,
        Severity::Moderate => &MODERATE,
        Severity::Low => &LOW,
        Severity::Aligned => &ALIGNED,
    }
}

/// A single extra line triggered by an out-of-range lab value.
struct Nudge {
    category: Category,
    fires: fn(&BiomarkerPayload) -> bool,
    text: &'static str,
}

fn elevated_glucose(b: &BiomarkerPayload) -> bool {
    b.glucose > 100.0
}

fn elevated_crp(b: &BiomarkerPayload) -> bool {
    b.crp > 3.0
}

fn elevated_wbc(b: &BiomarkerPayload) -> bool {
    b.wbc > 10.0
}

fn elevated_alkaline_phosphatase(b: &BiomarkerPayload) -> bool {
    b.alkaline_phosphatase > 120.0
}

// Checked in this order; each appends at most once.
const NUDGES: [Nudge; 4] = [
    Nudge {
        category: Category::Nutrition,
        fires: elevated_glucose,
        text: "Emphasize post-meal walks (10–15 min) to improve glucose clearance.",
    },
    Nudge {
        category: Category::Stress,
        fires: elevated_crp,
        text: "Consider anti-inflammatory diet patterns and manage stress load this week.",
    },
    Nudge {
        category: Category::Stress,
        fires: elevated_wbc,
        text: "Discuss persistent elevated WBC with a clinician to rule out acute issues.",
    },
    Nudge {
        category: Category::Nutrition,
        fires: elevated_alkaline_phosphatase,
        text: "Evaluate vitamin D and mineral status with your provider.",
    },
];

/// Builds guidance for an age gap and the latest entry, if any.
///
/// A missing gap is bucketed as `Aligned` (see [`Severity::from_gap`]).
pub fn recommend(age_gap: Option<f64>, latest: Option<&HistoryEntry>) -> RecommendationSet {
    recommend_for(Severity::from_gap(age_gap), latest.map(|e| &e.biomarkers))
}

pub fn recommend_for(severity: Severity, labs: Option<&BiomarkerPayload>) -> RecommendationSet {
    let mut set = RecommendationSet::default();
    let bucket = block_for(severity);

    for category in Category::ALL {
        set.extend(category, BASELINE.lines(category).iter().copied());
        set.extend(category, bucket.lines(category).iter().copied());
    }

    if let Some(labs) = labs {
        for nudge in NUDGES.iter().filter(|n| (n.fires)(labs)) {
            set.extend(nudge.category, [nudge.text]);
        }
    }

    set
}
