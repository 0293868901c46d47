use age_align::app::dashboard;
use age_align::utils::error::{AgeAlignError, ErrorSeverity};
use age_align::utils::{logger, validation::Validate};
use age_align::{AgeAlignEngine, CliConfig, HistoryExporter, LocalStorage};
use clap::Parser;

fn exit_code(e: &AgeAlignError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report_failure(stage: &str, e: &AgeAlignError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e).max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting age-align");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        report_failure("Configuration validation", &e);
    }

    let payload = match config.form().parse() {
        Ok(payload) => payload,
        Err(e) => report_failure("Input parsing", &e),
    };

    let mut engine = AgeAlignEngine::new();
    let assessment = match engine.submit(payload) {
        Ok(assessment) => assessment,
        Err(e) => report_failure("Estimation", &e),
    };

    println!("{}", dashboard::format_summary(Some(&assessment.summary)));
    println!("{}", dashboard::format_recommendations(&assessment.recommendations));

    if !config.export.is_empty() {
        let storage = LocalStorage::new(config.export_dir.clone());
        let exporter = HistoryExporter::new(storage, config);
        match exporter.export(engine.ledger().history_as_sequence()).await {
            Ok(files) => println!("📁 Exported: {}", files.join(", ")),
            Err(e) => report_failure("Export", &e),
        }
    }

    Ok(())
}
