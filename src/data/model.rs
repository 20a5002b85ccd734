use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome: `class` 0 is a failure, 1 is a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret a numeric `class` value. Anything other than 0 or 1 is rejected.
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Outcome::Failure)
        } else if value == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    /// The numeric class value, also used as the scatter y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one cleaned row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table that survived cleaning).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    /// Always finite.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Grouping / colour key in the scatter chart.
    pub booster_category: String,
    /// Display-only identifier.
    pub flight_number: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The cleaned dataset with pre-computed views for the input controls.
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    /// All records in source order.
    pub records: Vec<LaunchRecord>,
    /// Sorted distinct launch sites (site selector options).
    pub sites: Vec<String>,
    /// Sorted distinct booster categories (scatter colour legend).
    pub booster_categories: Vec<String>,
    /// Observed `(min, max)` payload mass, `None` for an empty dataset.
    pub payload_bounds: Option<(f64, f64)>,
    /// Source rows discarded during cleaning.
    pub dropped_rows: usize,
}

impl LaunchDataset {
    /// Build the derived views from cleaned records.
    pub fn from_records(records: Vec<LaunchRecord>, dropped_rows: usize) -> Self {
        let sites: BTreeSet<&str> = records.iter().map(|r| r.site.as_str()).collect();
        let boosters: BTreeSet<&str> = records
            .iter()
            .map(|r| r.booster_category.as_str())
            .collect();

        let payload_bounds = records.iter().map(|r| r.payload_mass_kg).fold(
            None,
            |acc: Option<(f64, f64)>, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            },
        );

        LaunchDataset {
            sites: sites.into_iter().map(str::to_string).collect(),
            booster_categories: boosters.into_iter().map(str::to_string).collect(),
            payload_bounds,
            dropped_rows,
            records,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Filter inputs
// ---------------------------------------------------------------------------

/// Site selector value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Closed payload interval `[low, high]` in kilograms, `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Fixed bounds of the range selector.
    pub const DISPLAY_MIN: f64 = 0.0;
    pub const DISPLAY_MAX: f64 = 10_000.0;

    /// Build a range, swapping the ends if given in reverse.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { low: a, high: b }
        } else {
            PayloadRange { low: b, high: a }
        }
    }

    /// The full selector range `[0, 10000]`.
    pub fn display() -> Self {
        PayloadRange::new(Self::DISPLAY_MIN, Self::DISPLAY_MAX)
    }

    /// Initial selector value: the observed payload bounds of the dataset,
    /// clamped into the selector bounds.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        match dataset.payload_bounds {
            Some((lo, hi)) => PayloadRange::new(lo, hi).clamped_to_display(),
            None => PayloadRange::display(),
        }
    }

    /// Same range with both ends clamped into the selector bounds.
    pub fn clamped_to_display(self) -> Self {
        PayloadRange::new(
            self.low.clamp(Self::DISPLAY_MIN, Self::DISPLAY_MAX),
            self.high.clamp(Self::DISPLAY_MIN, Self::DISPLAY_MAX),
        )
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}
