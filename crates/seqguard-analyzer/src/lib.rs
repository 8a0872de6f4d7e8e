//! seqguard-analyzer — predicts primary key sequence exhaustion.
//!
//! # Pipeline
//!
//! ```text
//! descriptors ──group by table──▶ representative
//!   ├── skip: abstract | no last entry | unsupported pk type
//!   ├── RateEstimator      rows in [last.created_at - window, last.created_at] / window, min 1
//!   ├── OverflowPredictor  remaining = ceiling - current
//!   │                      days = remaining / rate
//!   │                      within = remaining == 0 || days <= horizon
//!   └── RiskClassifier     safe | soon | overflowed
//! ```
//!
//! `AnalysisRunner::analyze_strict` fails with `AnalysisError::Overflow`
//! when any table is soon or overflowed. `analyze_lenient` turns that
//! failure into a warning plus an optional `Signalizer` call.

pub mod classifier;
pub mod predictor;
pub mod rate;
pub mod report;
pub mod runner;
pub mod sink;

pub use classifier::classify;
pub use predictor::{OverflowPredictor, Projection};
pub use rate::{RateEstimator, RateSample};
pub use runner::AnalysisRunner;
pub use sink::{NotificationSink, Signalizer, TracingSink};
