use age_align::app::dashboard;
use age_align::core::ConfigProvider;
use age_align::utils::error::ErrorSeverity;
use age_align::utils::{logger, validation::Validate};
use age_align::{AgeAlignEngine, HistoryExporter, LocalStorage, SessionConfig};
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "age-align-session")]
#[command(about = "Track biological age across a session of lab panels")]
struct Args {
    /// Path to the TOML session file
    #[arg(short, long, default_value = "age-align-session.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Print the latest assessment as JSON instead of the dashboard
    #[arg(long)]
    json: bool,

    /// Validate and summarize the session without computing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match SessionConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load session file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if args.json_logs || config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || config.verbose());
    }

    tracing::info!("🚀 Loaded session '{}' from {}", config.session.name, args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Session validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if args.dry_run {
        display_session_summary(&config);
        return Ok(());
    }

    let mut engine = AgeAlignEngine::new();
    if let Err(e) = engine.submit_all(config.entries.iter().copied()) {
        tracing::error!(
            "❌ Entry {} rejected: {} (Category: {:?}, Severity: {:?})",
            engine.ledger().len() + 1,
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    let ledger = engine.ledger();
    if args.json {
        let report = serde_json::json!({
            "session": config.session.name,
            "summary": ledger.summary(),
            "severity": ledger.summary().map(|s| age_align::core::Severity::from_gap(Some(s.age_gap))),
            "history": ledger.history_as_sequence(),
            "recommendations": engine.current_recommendations(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", dashboard::format_summary(ledger.summary().as_ref()));
        println!("{}", dashboard::format_progress(ledger.chart_series().as_ref()));
        println!("{}", dashboard::format_recommendations(&engine.current_recommendations()));
    }

    if !config.export_formats().is_empty() {
        let storage = LocalStorage::new(config.export_dir());
        let exporter = HistoryExporter::new(storage, config.clone());
        let files = exporter
            .export(engine.ledger().history_as_sequence())
            .await
            .with_context(|| format!("exporting history to {}", config.export_dir()))?;
        println!("📁 Exported to {}: {}", config.export_dir(), files.join(", "));
    }

    Ok(())
}

fn display_session_summary(config: &SessionConfig) {
    println!("📋 Session Summary:");
    println!("  Name: {}", config.session.name);
    if let Some(description) = &config.session.description {
        println!("  Description: {}", description);
    }
    println!("  Entries: {}", config.entries.len());
    for (index, entry) in config.entries.iter().enumerate() {
        println!(
            "    #{:<3} age {:>5.1}  glucose {:>6.1}  crp {:>5.2}",
            index + 1,
            entry.chronological_age,
            entry.glucose,
            entry.crp
        );
    }
    if config.export_formats().is_empty() {
        println!("  Export: disabled");
    } else {
        println!(
            "  Export: {} -> {}",
            config.export_formats().join(", "),
            config.export_dir()
        );
    }
    println!();
    println!("✅ Dry run complete. Nothing was computed or written.");
}
