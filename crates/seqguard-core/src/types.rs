//! Shared types used across seqguard crates.

use serde::{Deserialize, Serialize};

/// Unix epoch seconds.
pub type Timestamp = u64;

/// Seconds in one day.
pub const DAY_SECS: u64 = 24 * 60 * 60;

/// The most recent row of a sequence-backed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Value of the primary key column.
    pub identifier: u64,
    /// Creation time, when the table records one.
    pub created_at: Option<Timestamp>,
}

/// Primary key column of a table and its declared SQL type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub name: String,
    pub sql_type: String,
}

/// A trackable sequence as seen by the analyzer.
///
/// Implementations wrap whatever data-access layer the caller uses. Several
/// descriptors may point at the same physical table; the analyzer groups
/// them by [`SequenceDescriptor::table_name`] and only reads the first one.
/// Data-access methods return `anyhow::Result` and their errors abort the
/// whole analysis run untouched.
pub trait SequenceDescriptor {
    /// Logical model name, used in log messages.
    fn name(&self) -> &str;

    /// Physical table name, used for grouping and reporting.
    fn table_name(&self) -> &str;

    /// Abstract definitions have no table of their own and are skipped.
    fn is_abstract(&self) -> bool;

    fn primary_key(&self) -> anyhow::Result<PrimaryKey>;

    /// The row with the highest identifier, or `None` for an empty table.
    fn last_entry(&self) -> anyhow::Result<Option<Entry>>;

    /// Number of rows created in the inclusive range `[from, to]`.
    fn count_created_between(&self, from: Timestamp, to: Timestamp) -> anyhow::Result<u64>;
}

impl<T: SequenceDescriptor + ?Sized> SequenceDescriptor for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn table_name(&self) -> &str {
        (**self).table_name()
    }

    fn is_abstract(&self) -> bool {
        (**self).is_abstract()
    }

    fn primary_key(&self) -> anyhow::Result<PrimaryKey> {
        (**self).primary_key()
    }

    fn last_entry(&self) -> anyhow::Result<Option<Entry>> {
        (**self).last_entry()
    }

    fn count_created_between(&self, from: Timestamp, to: Timestamp) -> anyhow::Result<u64> {
        (**self).count_created_between(from, to)
    }
}

/// Risk classification for one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLabel {
    /// Exhaustion lies beyond the horizon.
    Safe,
    /// Exhaustion falls within the horizon.
    Soon,
    /// The ceiling has been reached.
    Overflowed,
}

impl RiskLabel {
    pub fn is_failing(&self) -> bool {
        matches!(self, RiskLabel::Soon | RiskLabel::Overflowed)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            RiskLabel::Safe => "✅",
            RiskLabel::Soon => "⚠️",
            RiskLabel::Overflowed => "🚫",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLabel::Safe => "SAFE",
            RiskLabel::Soon => "OVERFLOW SOON",
            RiskLabel::Overflowed => "OVERFLOWED",
        }
    }
}

/// Outcome of analyzing one sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowVerdict {
    pub table: String,
    pub model: String,
    pub column: String,
    pub current_value: u64,
    pub ceiling: u64,
    pub daily_rate: u64,
    pub remaining: u64,
    /// Absent when the sequence has already overflowed.
    pub days_to_overflow: Option<u64>,
    pub risk: RiskLabel,
}

/// Why a table was left out of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "reason")]
pub enum SkipReason {
    Abstract,
    Empty,
    UnsupportedType { column: String, sql_type: String },
}

impl SkipReason {
    pub fn describe(&self) -> String {
        match self {
            SkipReason::Abstract => "abstract definition".to_string(),
            SkipReason::Empty => "table is empty".to_string(),
            SkipReason::UnsupportedType { column, sql_type } => {
                format!("{column} has unsupported type {sql_type}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSequence {
    pub table: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Aggregate of one analysis run.
///
/// `overflowed` and `overflow_soon` hold table names in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub horizon_days: u64,
    pub verdicts: Vec<OverflowVerdict>,
    pub skipped: Vec<SkippedSequence>,
    pub overflowed: Vec<String>,
    pub overflow_soon: Vec<String>,
}

impl AnalysisReport {
    pub fn new(horizon_days: u64) -> Self {
        Self {
            horizon_days,
            ..Self::default()
        }
    }

    /// Record a verdict, filing failing tables into their list.
    pub fn push_verdict(&mut self, verdict: OverflowVerdict) {
        match verdict.risk {
            RiskLabel::Overflowed => self.overflowed.push(verdict.table.clone()),
            RiskLabel::Soon => self.overflow_soon.push(verdict.table.clone()),
            RiskLabel::Safe => {}
        }
        self.verdicts.push(verdict);
    }

    pub fn push_skipped(&mut self, table: &str, reason: SkipReason) {
        self.skipped.push(SkippedSequence {
            table: table.to_string(),
            reason,
        });
    }

    /// Whether any table is overflowed or will overflow within the horizon.
    pub fn has_breaches(&self) -> bool {
        !self.overflowed.is_empty() || !self.overflow_soon.is_empty()
    }

    /// The aggregate alert message, e.g.
    /// `Overflowed tables: [a]. Overflow soon tables: [b, c]`.
    pub fn overflow_message(&self) -> String {
        format!(
            "Overflowed tables: {}. Overflow soon tables: {}",
            render_list(&self.overflowed),
            render_list(&self.overflow_soon)
        )
    }
}

fn render_list(tables: &[String]) -> String {
    format!("[{}]", tables.join(", "))
}
