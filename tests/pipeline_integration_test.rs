use age_align::app::form::BiomarkerForm;
use age_align::core::{BiomarkerPayload, Category, ConfigProvider, Severity};
use age_align::{
    estimate, recommend, AgeAlignEngine, AgeAlignError, HistoryExporter, HistoryLedger,
    LocalStorage, SharedLedger,
};
use anyhow::Result;
use tempfile::TempDir;

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

struct ExportConfig {
    dir: String,
    formats: Vec<String>,
}

impl ConfigProvider for ExportConfig {
    fn export_dir(&self) -> &str {
        &self.dir
    }

    fn export_formats(&self) -> &[String] {
        &self.formats
    }
}

#[test]
fn test_form_to_recommendations_end_to_end() -> Result<()> {
    let form = BiomarkerForm {
        albumin: Some("4.2".into()),
        creatinine: Some("0.9".into()),
        glucose: Some("105".into()),
        crp: Some("1.0".into()),
        mcv: Some("88".into()),
        rdw: Some("13".into()),
        alkaline_phosphatase: Some("125".into()),
        wbc: Some("6.5".into()),
        chronological_age: Some("40".into()),
    };

    let mut engine = AgeAlignEngine::new();
    let assessment = engine.submit(form.parse()?)?;

    let expected_age = estimate(&form.parse()?)?.biological_age;
    assert_eq!(assessment.entry.biological_age, expected_age);
    assert_eq!(assessment.summary.age_gap, expected_age - 40.0);

    let without_labs = recommend(Some(assessment.summary.age_gap), None);
    let recs = &assessment.recommendations;
    assert_eq!(recs.nutrition.len(), without_labs.nutrition.len() + 2);
    assert_eq!(recs.exercise, without_labs.exercise);
    assert_eq!(recs.sleep, without_labs.sleep);
    assert_eq!(recs.stress, without_labs.stress);
    Ok(())
}

#[test]
fn test_history_tracks_every_submission_in_order() -> Result<()> {
    let mut engine = AgeAlignEngine::new();
    let payloads: Vec<BiomarkerPayload> = [40.0, 40.5, 41.0]
        .iter()
        .map(|&age| BiomarkerPayload {
            chronological_age: age,
            ..reference_payload()
        })
        .collect();

    let assessments = engine.submit_all(payloads)?;
    let history = engine.ledger().history_as_sequence();

    assert_eq!(history.len(), 3);
    for (assessment, entry) in assessments.iter().zip(history) {
        assert_eq!(&assessment.entry, entry);
    }
    assert_eq!(engine.ledger().latest(), history.last());
    assert_eq!(engine.ledger().summary(), Some(assessments[2].summary));
    Ok(())
}

#[test]
fn test_empty_history_shape() {
    let ledger = HistoryLedger::new();
    assert!(ledger.latest().is_none());
    assert!(ledger.summary().is_none());

    let set = recommend(None, ledger.latest());
    for category in Category::ALL {
        assert!(!set.items(category).is_empty(), "{:?} is empty", category);
    }
    assert_eq!(set, recommend(Some(-1.0), None));
}

#[test]
fn test_domain_failure_is_typed() {
    let payload = BiomarkerPayload {
        glucose: 0.0,
        alkaline_phosphatase: 0.0,
        ..reference_payload()
    };
    let mut engine = AgeAlignEngine::new();
    match engine.submit(payload) {
        Err(AgeAlignError::DomainComputation { .. }) => {}
        other => panic!("expected DomainComputation, got {:?}", other),
    }
    assert!(engine.ledger().is_empty());
}

#[test]
fn test_severity_routes_through_recommendations() {
    let high = recommend(Some(5.01), None);
    let moderate = recommend(Some(5.0), None);
    assert_eq!(high.sleep.len(), 4);
    assert_eq!(moderate.sleep.len(), 3);
    assert_eq!(Severity::from_gap(Some(-3.01)), Severity::Low);
}

#[tokio::test]
async fn test_export_history_to_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let export_dir = temp_dir.path().join("exports");
    let dir = export_dir.to_str().unwrap().to_string();

    let mut engine = AgeAlignEngine::new();
    engine.submit(reference_payload())?;
    engine.submit(BiomarkerPayload {
        chronological_age: 41.0,
        ..reference_payload()
    })?;

    let config = ExportConfig {
        dir: dir.clone(),
        formats: vec!["csv".to_string(), "json".to_string()],
    };
    let exporter = HistoryExporter::new(LocalStorage::new(dir.clone()), config);
    let written = exporter.export(engine.ledger().history_as_sequence()).await?;
    assert_eq!(written.len(), 2);

    let csv = std::fs::read_to_string(export_dir.join("history.csv"))?;
    assert_eq!(csv.lines().count(), 3);

    let json = std::fs::read_to_string(export_dir.join("history.json"))?;
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&json)?;
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[1]["chronological_age"], 41.0);
    assert!(parsed[0]["recorded_at"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_shared_ledger_serializes_concurrent_writers() -> Result<()> {
    let shared = SharedLedger::new(HistoryLedger::new());

    let mut handles = Vec::new();
    for i in 0..8 {
        let ledger = shared.clone();
        handles.push(tokio::spawn(async move {
            let payload = BiomarkerPayload {
                chronological_age: 30.0 + i as f64,
                ..reference_payload()
            };
            ledger.record(payload).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let snapshot = shared.snapshot().await;
    assert_eq!(snapshot.len(), 8);
    assert_eq!(shared.len().await, 8);
    assert!(snapshot.windows(2).all(|w| w[0].recorded_at <= w[1].recorded_at));
    assert_eq!(
        shared.summary().await,
        snapshot.last().map(|entry| entry.summary())
    );
    Ok(())
}
