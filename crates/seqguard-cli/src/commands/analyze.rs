use std::path::Path;

use seqguard_analyzer::report::format_report;
use seqguard_core::{AnalysisError, AnalysisReport, SnapshotSource};

use super::{build_runner, load_config};

pub fn analyze(
    snapshot: &str,
    config: Option<&str>,
    horizon_days: Option<u64>,
    lenient: bool,
    format: &str,
) -> anyhow::Result<()> {
    let mut config = load_config(config)?;
    if let Some(days) = horizon_days {
        config.analysis.horizon_days = days;
    }

    let source = SnapshotSource::from_file(Path::new(snapshot))?;
    let runner = build_runner(&config);

    if lenient {
        let report = runner.analyze_lenient(source.descriptors())?;
        return print_report(&report, format);
    }

    match runner.analyze_strict(source.descriptors()) {
        Ok(report) => print_report(&report, format),
        Err(AnalysisError::Overflow(report)) => {
            print_report(&report, format)?;
            anyhow::bail!(report.overflow_message())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_report(report: &AnalysisReport, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        _ => {
            println!("{}", format_report(report));
        }
    }
    Ok(())
}
