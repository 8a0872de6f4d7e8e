//! Analysis runner — drives one overflow analysis over a descriptor list.
//!
//! Descriptors are grouped by table so that several models backed by the
//! same table are read once. Each table is classified in discovery order and
//! the outcome is collected into a fresh `AnalysisReport`. Only once every
//! table has been evaluated does the run fail (strict) or signal (lenient).

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use seqguard_core::config::AnalysisSettings;
use seqguard_core::{
    AnalysisError, AnalysisReport, OverflowVerdict, PrimaryKey, RiskLabel, SequenceDescriptor,
    SkipReason, ceiling_for,
};

use crate::classifier::classify;
use crate::predictor::OverflowPredictor;
use crate::rate::RateEstimator;
use crate::sink::{NotificationSink, Signalizer, TracingSink};

pub struct AnalysisRunner {
    estimator: RateEstimator,
    predictor: OverflowPredictor,
    sink: Arc<dyn NotificationSink>,
    signalizer: Option<Arc<dyn Signalizer>>,
}

impl AnalysisRunner {
    /// Create a runner that logs through `tracing` and has no signalizer.
    pub fn new(settings: &AnalysisSettings) -> Self {
        Self {
            estimator: RateEstimator::from_settings(settings),
            predictor: OverflowPredictor::new(settings.horizon_days),
            sink: Arc::new(TracingSink),
            signalizer: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Set the hook invoked by [`AnalysisRunner::analyze_lenient`] on breach.
    pub fn with_signalizer(mut self, signalizer: Arc<dyn Signalizer>) -> Self {
        self.signalizer = Some(signalizer);
        self
    }

    pub fn horizon_days(&self) -> u64 {
        self.predictor.horizon_days()
    }

    /// Evaluate every table and return the report without judging it.
    ///
    /// Data-source errors abort the run.
    pub fn evaluate<D: SequenceDescriptor>(
        &self,
        descriptors: &[D],
    ) -> Result<AnalysisReport, AnalysisError> {
        let mut report = AnalysisReport::new(self.horizon_days());

        for (table, descriptor) in group_by_table(descriptors) {
            self.analyze_table(table, descriptor, &mut report)?;
        }

        debug!(
            tables = report.verdicts.len() + report.skipped.len(),
            overflowed = report.overflowed.len(),
            overflow_soon = report.overflow_soon.len(),
            "analysis finished"
        );
        Ok(report)
    }

    /// Fail with [`AnalysisError::Overflow`] when any table is overflowed or
    /// will overflow within the horizon.
    pub fn analyze_strict<D: SequenceDescriptor>(
        &self,
        descriptors: &[D],
    ) -> Result<AnalysisReport, AnalysisError> {
        let report = self.evaluate(descriptors)?;
        if report.has_breaches() {
            return Err(AnalysisError::Overflow(Box::new(report)));
        }
        Ok(report)
    }

    /// Like [`AnalysisRunner::analyze_strict`], but a breach is sent to the
    /// sink and the signalizer instead of being returned. Data-source errors
    /// still propagate.
    pub fn analyze_lenient<D: SequenceDescriptor>(
        &self,
        descriptors: &[D],
    ) -> Result<AnalysisReport, AnalysisError> {
        match self.analyze_strict(descriptors) {
            Err(AnalysisError::Overflow(report)) => {
                self.signalize(&report.overflow_message());
                Ok(*report)
            }
            other => other,
        }
    }

    fn analyze_table<D: SequenceDescriptor>(
        &self,
        table: &str,
        descriptor: &D,
        report: &mut AnalysisReport,
    ) -> Result<(), AnalysisError> {
        if descriptor.is_abstract() {
            debug!(table, model = descriptor.name(), "skipping abstract model");
            report.push_skipped(table, SkipReason::Abstract);
            return Ok(());
        }

        let Some(last) = descriptor.last_entry()? else {
            debug!(table, "skipping empty table");
            report.push_skipped(table, SkipReason::Empty);
            return Ok(());
        };

        let pk = descriptor.primary_key()?;
        let ceiling = match resolve_ceiling(table, &pk) {
            Ok(ceiling) => ceiling,
            Err(e) => {
                debug!(error = %e, "skipping table");
                self.sink.warn(&format!(
                    "Model {} has primary_key {} with unsupported type {}",
                    descriptor.name(),
                    pk.name,
                    pk.sql_type
                ));
                report.push_skipped(
                    table,
                    SkipReason::UnsupportedType {
                        column: pk.name,
                        sql_type: pk.sql_type,
                    },
                );
                return Ok(());
            }
        };

        let daily_rate = self.estimator.estimate(descriptor, &last)?;
        let projection = self.predictor.project(last.identifier, ceiling, daily_rate);
        let risk = classify(&projection);

        match risk {
            RiskLabel::Overflowed => {
                self.sink
                    .warn(&format!("Table {table} field {} has overflown!", pk.name));
            }
            RiskLabel::Soon => {
                self.sink.warn(&format!(
                    "Table {table} field {} will overflow after {} records!",
                    pk.name, projection.remaining
                ));
            }
            RiskLabel::Safe => {
                self.sink.info(&format!(
                    "Table {table} field {} is not going to overflow in the next {} days.",
                    pk.name,
                    self.horizon_days()
                ));
            }
        }

        report.push_verdict(OverflowVerdict {
            table: table.to_string(),
            model: descriptor.name().to_string(),
            column: pk.name,
            current_value: last.identifier,
            ceiling,
            daily_rate,
            remaining: projection.remaining,
            days_to_overflow: projection.days_to_overflow,
            risk,
        });
        Ok(())
    }

    fn signalize(&self, message: &str) {
        self.sink.warn(message);
        if let Some(signalizer) = &self.signalizer {
            info!("dispatching overflow signal");
            signalizer.signalize(message);
        }
    }
}

fn resolve_ceiling(table: &str, pk: &PrimaryKey) -> Result<u64, AnalysisError> {
    ceiling_for(&pk.sql_type).ok_or_else(|| AnalysisError::UnsupportedType {
        table: table.to_string(),
        column: pk.name.clone(),
        sql_type: pk.sql_type.clone(),
    })
}

/// First descriptor per table, in discovery order.
fn group_by_table<D: SequenceDescriptor>(descriptors: &[D]) -> Vec<(&str, &D)> {
    let mut seen = HashSet::new();
    let mut groups = Vec::new();
    for descriptor in descriptors {
        let table = descriptor.table_name();
        if seen.insert(table) {
            groups.push((table, descriptor));
        }
    }
    groups
}
