//! Headline figures for the dashboard's KPI cards.

use std::collections::BTreeMap;

use serde::Serialize;

use parity_entity::violation::{Severity, Violation};

/// Aggregate figures over a set of violations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationSummary {
    /// Number of violations.
    pub total: usize,
    /// Count per severity; every severity is present, possibly with zero.
    pub by_severity: BTreeMap<Severity, usize>,
    /// Violations without a reason.
    pub unassigned: usize,
    /// Sum of known revenue-loss estimates.
    pub revenue_loss: f64,
}

impl ViolationSummary {
    /// Summarize a slice of violations.
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut by_severity: BTreeMap<Severity, usize> =
            Severity::ALL.iter().map(|s| (*s, 0)).collect();
        let mut unassigned = 0;
        let mut revenue_loss = 0.0;

        for v in violations {
            *by_severity.entry(v.severity).or_default() += 1;
            if !v.is_resolved() {
                unassigned += 1;
            }
            revenue_loss += v.revenue_loss.unwrap_or(0.0);
        }

        Self {
            total: violations.len(),
            by_severity,
            unassigned,
            revenue_loss,
        }
    }

    /// Count for one severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }
}
