use crate::domain::model::HistoryEntry;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use serde::Serialize;

pub const SUPPORTED_EXPORT_FORMATS: [&str; 2] = ["csv", "json"];

pub const CSV_FILENAME: &str = "history.csv";
pub const JSON_FILENAME: &str = "history.json";

const CSV_HEADERS: [&str; 13] = [
    "recorded_at",
    "albumin",
    "creatinine",
    "glucose",
    "crp",
    "mcv",
    "rdw",
    "alkaline_phosphatase",
    "wbc",
    "chronological_age",
    "biological_age",
    "age_gap",
    "index",
];

/// Flat CSV row; the csv crate cannot serialize flattened structs.
#[derive(Debug, Serialize)]
struct HistoryRow {
    recorded_at: String,
    albumin: f64,
    creatinine: f64,
    glucose: f64,
    crp: f64,
    mcv: f64,
    rdw: f64,
    alkaline_phosphatase: f64,
    wbc: f64,
    chronological_age: f64,
    biological_age: f64,
    age_gap: f64,
    index: usize,
}

impl HistoryRow {
    fn new(index: usize, entry: &HistoryEntry) -> Self {
        let b = &entry.biomarkers;
        Self {
            recorded_at: entry.recorded_at.to_rfc3339(),
            albumin: b.albumin,
            creatinine: b.creatinine,
            glucose: b.glucose,
            crp: b.crp,
            mcv: b.mcv,
            rdw: b.rdw,
            alkaline_phosphatase: b.alkaline_phosphatase,
            wbc: b.wbc,
            chronological_age: b.chronological_age,
            biological_age: entry.biological_age,
            age_gap: entry.age_gap,
            index,
        }
    }
}

pub fn render_csv(entries: &[HistoryEntry]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for (index, entry) in entries.iter().enumerate() {
        writer.serialize(HistoryRow::new(index, entry))?;
    }

    let data = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(data)
}

pub fn render_json(entries: &[HistoryEntry]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(entries)?)
}

/// Writes one-way snapshots of the history in the configured formats.
pub struct HistoryExporter<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> HistoryExporter<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Returns the paths written, relative to the storage root.
    pub async fn export(&self, entries: &[HistoryEntry]) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in self.config.export_formats() {
            let (filename, data) = match format.as_str() {
                "csv" => (CSV_FILENAME, render_csv(entries)?),
                "json" => (JSON_FILENAME, render_json(entries)?),
                other => {
                    tracing::warn!("Skipping unsupported export format: {}", other);
                    continue;
                }
            };

            tracing::debug!("Writing {} ({} bytes)", filename, data.len());
            self.storage.write_file(filename, &data).await?;
            written.push(filename.to_string());
        }

        if written.is_empty() {
            tracing::debug!("No export formats configured for {}", self.config.export_dir());
        } else {
            tracing::info!(
                "Exported {} entries to {} as {}",
                entries.len(),
                self.config.export_dir(),
                written.join(", ")
            );
        }

        Ok(written)
    }
}
