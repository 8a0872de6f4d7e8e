//! Human-readable report formatting.

use seqguard_core::{AnalysisReport, RiskLabel};

pub fn format_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    let status = if !report.overflowed.is_empty() {
        RiskLabel::Overflowed.label()
    } else if !report.overflow_soon.is_empty() {
        RiskLabel::Soon.label()
    } else {
        RiskLabel::Safe.label()
    };

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  seqguard Sequence Overflow Analysis     ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!("║  Horizon:  {:<29}║\n", format!("{} days", report.horizon_days)));
    out.push_str(&format!("║  Status:   {:<29}║\n", status));
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    let safe = report
        .verdicts
        .iter()
        .filter(|v| v.risk == RiskLabel::Safe)
        .count();

    out.push_str(&format!(
        "Tables ({} total):\n",
        report.verdicts.len() + report.skipped.len()
    ));
    out.push_str(&format!("  ✅ {safe} safe\n"));
    out.push_str(&format!("  ⚠️  {} overflow soon\n", report.overflow_soon.len()));
    out.push_str(&format!("  🚫 {} overflowed\n", report.overflowed.len()));
    out.push_str(&format!("  ⏭️  {} skipped\n\n", report.skipped.len()));

    let failing: Vec<_> = report.verdicts.iter().filter(|v| v.risk.is_failing()).collect();
    if !failing.is_empty() {
        out.push_str("AT RISK:\n\n");
        for (i, v) in failing.iter().enumerate() {
            out.push_str(&format!("  {}. {} {}.{}\n", i + 1, v.risk.symbol(), v.table, v.column));
            out.push_str(&format!("     Current:   {} / {}\n", v.current_value, v.ceiling));
            out.push_str(&format!("     Remaining: {}\n", v.remaining));
            out.push_str(&format!("     Rate:      ~{}/day\n", v.daily_rate));
            match v.days_to_overflow {
                Some(days) => out.push_str(&format!("     Overflow:  in ~{days} days\n")),
                None => out.push_str("     Overflow:  reached\n"),
            }
            out.push('\n');
        }
    }

    if !report.skipped.is_empty() {
        out.push_str("SKIPPED:\n\n");
        for s in &report.skipped {
            out.push_str(&format!("  • {} ({})\n", s.table, s.reason.describe()));
        }
        out.push('\n');
    }

    if report.has_breaches() {
        out.push_str(&report.overflow_message());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqguard_core::{OverflowVerdict, SkipReason};

    fn verdict(table: &str, risk: RiskLabel, remaining: u64) -> OverflowVerdict {
        OverflowVerdict {
            table: table.to_string(),
            model: "Model".to_string(),
            column: "id".to_string(),
            current_value: 100 - remaining,
            ceiling: 100,
            daily_rate: 1,
            remaining,
            days_to_overflow: (remaining > 0).then_some(remaining),
            risk,
        }
    }

    #[test]
    fn clean_report_has_no_alert_line() {
        let mut report = AnalysisReport::new(60);
        report.push_verdict(verdict("users", RiskLabel::Safe, 90));
        let text = format_report(&report);
        assert!(text.contains("SAFE"));
        assert!(text.contains("1 safe"));
        assert!(!text.contains("AT RISK"));
        assert!(!text.contains("Overflowed tables"));
    }

    #[test]
    fn failing_tables_are_listed() {
        let mut report = AnalysisReport::new(10);
        report.push_verdict(verdict("events", RiskLabel::Soon, 6));
        report.push_verdict(verdict("logs", RiskLabel::Overflowed, 0));
        report.push_skipped("drafts", SkipReason::Empty);

        let text = format_report(&report);
        assert!(text.contains("OVERFLOWED"));
        assert!(text.contains("events.id"));
        assert!(text.contains("in ~6 days"));
        assert!(text.contains("Overflow:  reached"));
        assert!(text.contains("drafts (table is empty)"));
        assert!(text.contains("Overflowed tables: [logs]. Overflow soon tables: [events]"));
    }
}
