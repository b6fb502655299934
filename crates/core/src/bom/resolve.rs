#![forbid(unsafe_code)]

use super::totals::{BomTotals, BomWarning, compute_totals, currencies, validate_for_save};
use crate::ids::ComponentId;
use crate::model::{BomLine, ComponentSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineSource {
    Live,
    Snapshot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedBomLine {
    pub line: BomLine,
    pub display: ComponentSnapshot,
    pub source: LineSource,
}

/// Resolves display data for each line. `lookup` returns the current fields of
/// a component that still exists; missing components fall back to the snapshot.
pub fn resolve_lines<F>(lines: &[BomLine], mut lookup: F) -> Vec<ResolvedBomLine>
where
    F: FnMut(&ComponentId) -> Option<ComponentSnapshot>,
{
    lines
        .iter()
        .map(|line| match lookup(&line.component_id) {
            Some(display) => ResolvedBomLine {
                line: line.clone(),
                display,
                source: LineSource::Live,
            },
            None => ResolvedBomLine {
                line: line.clone(),
                display: line.component.clone(),
                source: LineSource::Snapshot,
            },
        })
        .collect()
}

/// Replaces snapshots with live component data where available.
pub fn refresh_snapshots<F>(lines: &[BomLine], mut lookup: F) -> Vec<BomLine>
where
    F: FnMut(&ComponentId) -> Option<ComponentSnapshot>,
{
    lines
        .iter()
        .map(|line| {
            let mut line = line.clone();
            if let Some(snapshot) = lookup(&line.component_id) {
                line.component = snapshot;
            }
            line
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct BomSummary {
    pub lines: Vec<ResolvedBomLine>,
    pub totals: BomTotals,
    pub currencies: Vec<String>,
    pub warning: Option<BomWarning>,
}

impl BomSummary {
    pub fn is_mixed_currency(&self) -> bool {
        self.currencies.len() > 1
    }
}

pub fn summarize<F>(lines: &[BomLine], lookup: F) -> BomSummary
where
    F: FnMut(&ComponentId) -> Option<ComponentSnapshot>,
{
    BomSummary {
        lines: resolve_lines(lines, lookup),
        totals: compute_totals(lines),
        currencies: currencies(lines),
        warning: validate_for_save(lines),
    }
}
