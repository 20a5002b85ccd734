use std::collections::BTreeMap;
use std::sync::Arc;

use super::model::{LaunchDataset, LaunchRecord, Outcome, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Success aggregate (pie chart input)
// ---------------------------------------------------------------------------

/// One labelled pie slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    pub label: String,
    pub count: usize,
}

/// Pie chart input: slices plus the chart title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessAggregate {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl SuccessAggregate {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// Count for a label, `None` when the slice is absent.
    pub fn count_of(&self, label: &str) -> Option<usize> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.count)
    }
}

/// Pie chart data for a site selection.
///
/// * `All` – one slice per site (sorted), value = number of successes.
/// * `Site(s)` – "Success" and "Failure" counts for that site. An outcome
///   that never occurs at the site gets no slice at all.
pub fn success_aggregate(dataset: &LaunchDataset, selection: &SiteSelection) -> SuccessAggregate {
    match selection {
        SiteSelection::All => {
            let mut per_site: BTreeMap<&str, usize> = BTreeMap::new();
            for rec in &dataset.records {
                *per_site.entry(rec.site.as_str()).or_default() +=
                    usize::from(rec.outcome.class());
            }
            SuccessAggregate {
                title: "Total Successful Launches by Site".to_string(),
                slices: per_site
                    .into_iter()
                    .map(|(site, count)| Slice {
                        label: site.to_string(),
                        count,
                    })
                    .collect(),
            }
        }
        SiteSelection::Site(site) => {
            let (mut successes, mut failures) = (0usize, 0usize);
            for rec in dataset.records.iter().filter(|r| &r.site == site) {
                match rec.outcome {
                    Outcome::Success => successes += 1,
                    Outcome::Failure => failures += 1,
                }
            }
            let slices = [(Outcome::Success, successes), (Outcome::Failure, failures)]
                .into_iter()
                .filter(|&(_, count)| count > 0)
                .map(|(outcome, count)| Slice {
                    label: outcome.to_string(),
                    count,
                })
                .collect();
            SuccessAggregate {
                title: format!("Success vs Failure for {site}"),
                slices,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Payload / outcome filter (scatter chart input)
// ---------------------------------------------------------------------------

/// The outcome (y) axis always spans this range so both classes stay visible.
pub const OUTCOME_AXIS_BOUNDS: (f64, f64) = (-0.2, 1.2);

/// Scatter chart input: matching records, unaggregated, in source order.
///
/// Points are shared so per-frame consumers (hover labels) clone a pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterView {
    pub title: String,
    pub points: Arc<[LaunchRecord]>,
    pub y_bounds: (f64, f64),
}

/// Records with payload inside `range` (inclusive) and matching `selection`.
pub fn payload_outcome_filter(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: PayloadRange,
) -> ScatterView {
    let points: Arc<[LaunchRecord]> = dataset
        .records
        .iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .filter(|r| selection.matches(&r.site))
        .cloned()
        .collect();

    ScatterView {
        title: format!("Correlation Between Payload and Success – {selection}"),
        points,
        y_bounds: OUTCOME_AXIS_BOUNDS,
    }
}
