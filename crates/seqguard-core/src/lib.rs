//! seqguard-core — shared types for sequence overflow analysis.
//!
//! Defines the descriptor seam the analyzer reads sequences through, the
//! static table of integer type ceilings, the report types produced by a
//! run, the `seqguard.toml` configuration, and a JSON snapshot source that
//! implements the descriptor trait in memory.

pub mod ceiling;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod types;

pub use ceiling::{TypeCeiling, ceiling_for};
pub use config::GuardConfig;
pub use error::{AnalysisError, ConfigError, SnapshotError};
pub use snapshot::SnapshotSource;
pub use types::*;
