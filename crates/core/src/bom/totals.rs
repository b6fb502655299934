#![forbid(unsafe_code)]

use crate::model::BomLine;

pub const PERCENTAGE_LIMIT: f64 = 100.0;
const PERCENTAGE_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BomTotals {
    pub total_cost: f64,
    pub total_percentage: f64,
}

/// Sums line costs and percentages. Costs in different currencies are added
/// nominally; see [`currencies`] to detect that case.
pub fn compute_totals(lines: &[BomLine]) -> BomTotals {
    BomTotals {
        total_cost: order_free_sum(lines.iter().map(BomLine::line_cost)),
        total_percentage: order_free_sum(lines.iter().map(|line| line.percentage)),
    }
}

// Terms are added in sorted order so the float result does not depend on line order.
fn order_free_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

#[derive(Clone, Debug, PartialEq)]
pub enum BomWarning {
    PercentageExceeds { total: f64 },
}

impl BomWarning {
    pub fn message(&self) -> &'static str {
        match self {
            Self::PercentageExceeds { .. } => "percentage exceeds 100",
        }
    }
}

impl std::fmt::Display for BomWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PercentageExceeds { total } => write!(f, "{} (total={total})", self.message()),
        }
    }
}

/// Advisory check run before saving. A warning never blocks the save.
pub fn validate_for_save(lines: &[BomLine]) -> Option<BomWarning> {
    let total = compute_totals(lines).total_percentage;
    if total > PERCENTAGE_LIMIT + PERCENTAGE_TOLERANCE {
        return Some(BomWarning::PercentageExceeds { total });
    }
    None
}

/// Distinct currencies of the line snapshots, in first-seen order.
pub fn currencies(lines: &[BomLine]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for line in lines {
        if !out.iter().any(|c| c == &line.component.currency) {
            out.push(line.component.currency.clone());
        }
    }
    out
}
