pub mod analyze;
pub mod init;
pub mod watch;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use seqguard_analyzer::AnalysisRunner;
use seqguard_core::GuardConfig;

use crate::signal::FileSignalizer;

const DEFAULT_CONFIG: &str = "seqguard.toml";

/// Load the explicit config, else ./seqguard.toml, else defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<GuardConfig> {
    match path {
        Some(p) => GuardConfig::from_file(Path::new(p))
            .with_context(|| format!("loading config {p}")),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Ok(GuardConfig::from_file(Path::new(DEFAULT_CONFIG))?)
        }
        None => Ok(GuardConfig::default()),
    }
}

/// Build a runner from config, wiring the file signalizer when configured.
pub fn build_runner(config: &GuardConfig) -> AnalysisRunner {
    let runner = AnalysisRunner::new(&config.analysis);
    match &config.signal {
        Some(signal) => runner.with_signalizer(Arc::new(FileSignalizer::new(&signal.file))),
        None => runner,
    }
}
