//! Daily growth rate estimation.

use seqguard_core::{DAY_SECS, Entry, SequenceDescriptor, Timestamp};
use seqguard_core::config::AnalysisSettings;

/// Rows counted in the history window ending at the last entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSample {
    pub from: Timestamp,
    pub to: Timestamp,
    pub count: u64,
    pub window_days: u64,
}

impl RateSample {
    /// Average rows per day, never below 1.
    pub fn daily_rate(&self) -> u64 {
        (self.count / self.window_days).max(1)
    }
}

/// Estimates how many identifiers a sequence consumes per day.
#[derive(Debug, Clone, Copy)]
pub struct RateEstimator {
    default_daily_rate: u64,
    window_days: u64,
}

impl RateEstimator {
    pub fn new(default_daily_rate: u64, window_days: u64) -> Self {
        Self {
            default_daily_rate: default_daily_rate.max(1),
            window_days: window_days.max(1),
        }
    }

    pub fn from_settings(settings: &AnalysisSettings) -> Self {
        Self::new(settings.default_daily_rate, settings.rate_window_days)
    }

    /// Count recent rows of `descriptor`.
    ///
    /// Returns `None` when the last entry carries no creation time.
    pub fn sample<D: SequenceDescriptor + ?Sized>(
        &self,
        descriptor: &D,
        last: &Entry,
    ) -> anyhow::Result<Option<RateSample>> {
        let Some(to) = last.created_at else {
            return Ok(None);
        };
        let from = to.saturating_sub(self.window_days.saturating_mul(DAY_SECS));
        let count = descriptor.count_created_between(from, to)?;
        Ok(Some(RateSample {
            from,
            to,
            count,
            window_days: self.window_days,
        }))
    }

    /// Rows per day for `descriptor`, falling back to the default rate when
    /// recency cannot be measured.
    pub fn estimate<D: SequenceDescriptor + ?Sized>(
        &self,
        descriptor: &D,
        last: &Entry,
    ) -> anyhow::Result<u64> {
        let rate = match self.sample(descriptor, last)? {
            Some(sample) => {
                tracing::debug!(
                    table = descriptor.table_name(),
                    count = sample.count,
                    from = sample.from,
                    to = sample.to,
                    "sampled recent rows"
                );
                sample.daily_rate()
            }
            None => self.default_daily_rate,
        };
        Ok(rate)
    }
}

impl Default for RateEstimator {
    fn default() -> Self {
        Self::from_settings(&AnalysisSettings::default())
    }
}
