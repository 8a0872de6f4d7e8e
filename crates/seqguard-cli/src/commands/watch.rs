//! `seqguard watch` — periodic fail-soft analysis.
//!
//! Each tick reloads the snapshot and performs a complete lenient run with
//! its own report. A failed tick is logged and the loop keeps going.

use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use seqguard_analyzer::AnalysisRunner;
use seqguard_core::SnapshotSource;
use tracing::{error, info};

use super::{build_runner, load_config};

pub fn watch(snapshot: &str, config: Option<&str>, interval: &str) -> Result<()> {
    let interval = parse_interval(interval)?;
    let config = load_config(config)?;

    let runner = build_runner(&config);
    let runtime = tokio::runtime::Runtime::new()?;
    let runs = runtime.block_on(run_watch(
        &runner,
        snapshot,
        interval,
        tokio::signal::ctrl_c(),
    ));
    info!(runs, "watch stopped");

    Ok(())
}

/// Run lenient analyses every `interval` until `shutdown` resolves.
///
/// `shutdown` is polled as one pinned future across ticks, so a signal
/// that arrives during a run is seen on the next `select!`. Returns the
/// number of completed ticks.
async fn run_watch<F: Future>(
    runner: &AnalysisRunner,
    snapshot: &str,
    interval: Duration,
    shutdown: F,
) -> u64 {
    let mut ticker = tokio::time::interval(interval);
    tokio::pin!(shutdown);
    let mut runs = 0;

    info!(
        interval_secs = interval.as_secs(),
        snapshot, "watch started"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let result = SnapshotSource::from_file(Path::new(snapshot))
                    .map_err(anyhow::Error::from)
                    .and_then(|source| {
                        runner
                            .analyze_lenient(source.descriptors())
                            .map_err(anyhow::Error::from)
                    });
                match result {
                    Ok(report) => info!(
                        tables = report.verdicts.len(),
                        breaches = report.overflowed.len() + report.overflow_soon.len(),
                        "analysis run complete"
                    ),
                    Err(e) => error!(error = %e, "analysis run failed"),
                }
                runs += 1;
            }
            _ = &mut shutdown => {
                info!("watch shutting down");
                break;
            }
        }
    }

    runs
}

const MAX_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

/// Parse an interval like "30s", "15m", "1h", "1d" or bare seconds.
fn parse_interval(s: &str) -> Result<Duration> {
    let s = s.trim();
    let (digits, unit) = match s.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((i, _)) => s.split_at(i),
        None => (s, "s"),
    };
    let value: u64 = match digits.parse() {
        Ok(v) => v,
        Err(_) => bail!("invalid interval: {s}"),
    };
    let multiplier: u64 = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => bail!("invalid interval unit in {s}, expected s, m, h or d"),
    };
    let Some(secs) = value.checked_mul(multiplier) else {
        bail!("invalid interval: {s}");
    };
    if secs == 0 {
        bail!("interval must be positive");
    }
    if secs > MAX_INTERVAL_SECS {
        bail!("invalid interval: {s} exceeds 365d");
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units() {
        assert_eq!(parse_interval("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_interval("15m").unwrap(), Duration::from_secs(900));
        assert_eq!(parse_interval("1h").unwrap(), Duration::from_secs(3_600));
        assert_eq!(parse_interval("2d").unwrap(), Duration::from_secs(172_800));
        assert_eq!(parse_interval("45").unwrap(), Duration::from_secs(45));
    }

    #[test]
    fn rejects_bad_intervals() {
        assert!(parse_interval("").is_err());
        assert!(parse_interval("0s").is_err());
        assert!(parse_interval("5w").is_err());
        assert!(parse_interval("h").is_err());
    }

    #[tokio::test]
    async fn shutdown_outlives_many_ticks() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("snapshot.json");
        std::fs::write(&snapshot, r#"{ "models": [] }"#).unwrap();
        let runner = AnalysisRunner::new(&Default::default());

        // The shutdown deadline spans several ticks; a future rebuilt on
        // every iteration would never fire.
        let runs = tokio::time::timeout(
            Duration::from_secs(5),
            run_watch(
                &runner,
                &snapshot.display().to_string(),
                Duration::from_millis(10),
                tokio::time::sleep(Duration::from_millis(100)),
            ),
        )
        .await
        .expect("watch loop did not stop");
        assert!(runs >= 2);
    }

    #[tokio::test]
    async fn failed_ticks_keep_the_loop_alive() {
        let runner = AnalysisRunner::new(&Default::default());
        let runs = run_watch(
            &runner,
            "/nonexistent/snapshot.json",
            Duration::from_millis(10),
            tokio::time::sleep(Duration::from_millis(50)),
        )
        .await;
        assert!(runs >= 2);
    }

    #[test]
    fn oversized_interval_is_rejected() {
        let err = parse_interval("213503982334602d").unwrap_err();
        assert!(err.to_string().contains("invalid interval"));
        assert!(parse_interval("18446744073709551615m").is_err());
        assert!(parse_interval("18446744073709551615s").is_err());
        assert!(parse_interval("366d").is_err());
        assert_eq!(
            parse_interval("365d").unwrap(),
            Duration::from_secs(MAX_INTERVAL_SECS)
        );
    }
}
