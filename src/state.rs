use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::data::filter::{ScatterView, SuccessAggregate, payload_outcome_filter, success_aggregate};
use crate::data::loader::load_file;
use crate::data::model::{LaunchDataset, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Holds the two inputs (site selection, payload range) and the two derived
/// chart views. Inputs are only changed through the setters, which recompute
/// exactly the views that depend on them.
pub struct AppState {
    /// Loaded dataset, never mutated; replaced wholesale on File → Open.
    pub dataset: LaunchDataset,

    /// Where the dataset came from, shown in the top bar.
    pub source: Option<PathBuf>,

    site: SiteSelection,
    payload_range: PayloadRange,

    /// Pie chart view, derived from `site` only.
    pub pie: SuccessAggregate,

    /// Scatter chart view, derived from `site` and `payload_range`.
    pub scatter: ScatterView,

    /// Colour per booster category (scatter series).
    pub booster_colors: ColorMap,

    /// Colour per launch site (pie slices in the all-sites view).
    pub site_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pie_revision: u64,
    scatter_revision: u64,
}

impl AppState {
    /// Initial state: all sites, payload range = observed min/max.
    pub fn new(dataset: LaunchDataset, source: Option<PathBuf>) -> Self {
        let site = SiteSelection::All;
        let payload_range = PayloadRange::initial(&dataset);
        let pie = success_aggregate(&dataset, &site);
        let scatter = payload_outcome_filter(&dataset, &site, payload_range);

        Self {
            booster_colors: ColorMap::new(dataset.booster_categories.iter().cloned()),
            site_colors: ColorMap::new(dataset.sites.iter().cloned()),
            dataset,
            source,
            site,
            payload_range,
            pie,
            scatter,
            status_message: None,
            pie_revision: 0,
            scatter_revision: 0,
        }
    }

    /// Ingest a newly loaded dataset and reset both inputs.
    pub fn set_dataset(&mut self, dataset: LaunchDataset, source: Option<PathBuf>) {
        let pie_revision = self.pie_revision + 1;
        let scatter_revision = self.scatter_revision + 1;
        *self = Self::new(dataset, source);
        self.pie_revision = pie_revision;
        self.scatter_revision = scatter_revision;
    }

    /// Load a file and replace the dataset. On failure the current dataset is kept.
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        let dataset = load_file(path).with_context(|| format!("opening {}", path.display()))?;
        self.set_dataset(dataset, Some(path.to_path_buf()));
        Ok(())
    }

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    /// Change the site selection; both charts depend on it.
    pub fn set_site(&mut self, site: SiteSelection) {
        if site == self.site {
            return;
        }
        self.site = site;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Change the payload range; only the scatter chart depends on it.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        let range = range.clamped_to_display();
        if range == self.payload_range {
            return;
        }
        self.payload_range = range;
        self.recompute_scatter();
    }

    /// Bumped every time the pie view is recomputed.
    pub fn pie_revision(&self) -> u64 {
        self.pie_revision
    }

    /// Bumped every time the scatter view is recomputed.
    pub fn scatter_revision(&self) -> u64 {
        self.scatter_revision
    }

    fn recompute_pie(&mut self) {
        self.pie = success_aggregate(&self.dataset, &self.site);
        self.pie_revision += 1;
        log::debug!("Pie recomputed for {}: {} slices", self.site, self.pie.slices.len());
    }

    fn recompute_scatter(&mut self) {
        self.scatter = payload_outcome_filter(&self.dataset, &self.site, self.payload_range);
        self.scatter_revision += 1;
        log::debug!(
            "Scatter recomputed for {} in [{}, {}]: {} points",
            self.site,
            self.payload_range.low(),
            self.payload_range.high(),
            self.scatter.points.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn dataset() -> LaunchDataset {
        let rec = |site: &str, payload: f64, outcome: Outcome, flight: &str| LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome,
            booster_category: "FT".to_string(),
            flight_number: flight.to_string(),
        };
        LaunchDataset::from_records(
            vec![
                rec("siteA", 500.0, Outcome::Success, "1"),
                rec("siteA", 2000.0, Outcome::Failure, "2"),
                rec("siteB", 1500.0, Outcome::Success, "3"),
            ],
            0,
        )
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new(dataset(), None);
        assert_eq!(state.site(), &SiteSelection::All);
        assert_eq!(state.payload_range(), PayloadRange::new(500.0, 2000.0));
        assert_eq!(state.pie.title, "Total Successful Launches by Site");
        assert_eq!(state.scatter.points.len(), 3);
    }

    #[test]
    fn test_site_change_updates_both_views() {
        let mut state = AppState::new(dataset(), None);
        state.set_site(SiteSelection::Site("siteA".to_string()));
        assert_eq!(state.pie.count_of("Success"), Some(1));
        assert_eq!(state.pie.count_of("Failure"), Some(1));
        assert_eq!(state.scatter.points.len(), 2);
        assert_eq!(state.pie_revision(), 1);
        assert_eq!(state.scatter_revision(), 1);
    }

    #[test]
    fn test_payload_change_leaves_pie_alone() {
        let mut state = AppState::new(dataset(), None);
        let pie_before = state.pie.clone();
        state.set_payload_range(PayloadRange::new(1000.0, 3000.0));

        assert_eq!(state.pie, pie_before);
        assert_eq!(state.pie_revision(), 0);
        assert_eq!(state.scatter_revision(), 1);
        let flights: Vec<&str> = state
            .scatter
            .points
            .iter()
            .map(|r| r.flight_number.as_str())
            .collect();
        assert_eq!(flights, vec!["2", "3"]);
    }

    #[test]
    fn test_unchanged_input_is_noop() {
        let mut state = AppState::new(dataset(), None);
        state.set_site(SiteSelection::All);
        state.set_payload_range(PayloadRange::new(500.0, 2000.0));
        assert_eq!(state.pie_revision(), 0);
        assert_eq!(state.scatter_revision(), 0);
    }

    #[test]
    fn test_payload_range_is_clamped() {
        let mut state = AppState::new(dataset(), None);
        state.set_payload_range(PayloadRange::new(-10.0, 20_000.0));
        assert_eq!(state.payload_range(), PayloadRange::new(0.0, 10_000.0));
    }

    #[test]
    fn test_scatter_reflects_latest_inputs() {
        let mut state = AppState::new(dataset(), None);
        state.set_payload_range(PayloadRange::new(1000.0, 3000.0));
        state.set_site(SiteSelection::Site("siteA".to_string()));
        assert_eq!(state.scatter.points.len(), 1);
        assert_eq!(state.scatter.points[0].flight_number, "2");
        assert_eq!(
            state.scatter.title,
            "Correlation Between Payload and Success – siteA"
        );
    }

    #[test]
    fn test_open_path_failure_keeps_dataset() {
        let mut state = AppState::new(dataset(), None);
        state.set_site(SiteSelection::Site("siteB".to_string()));
        let err = state.open_path(Path::new("/nonexistent/launches.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("opening /nonexistent/launches.csv"));
        assert_eq!(state.dataset.len(), 3);
        assert_eq!(state.site(), &SiteSelection::Site("siteB".to_string()));
    }

    #[test]
    fn test_open_path_resets_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.csv");
        std::fs::write(
            &path,
            "Launch Site,Payload Mass (kg),class,Booster Version Category,Flight Number\n\
             X,100,1,FT,1\n\
             X,300,0,B4,2\n",
        )
        .unwrap();

        let mut state = AppState::new(dataset(), None);
        state.set_site(SiteSelection::Site("siteA".to_string()));
        state.open_path(&path).unwrap();

        assert_eq!(state.site(), &SiteSelection::All);
        assert_eq!(state.payload_range(), PayloadRange::new(100.0, 300.0));
        assert_eq!(state.dataset.sites, vec!["X"]);
        assert_eq!(state.pie.count_of("X"), Some(1));
        assert_eq!(state.source.as_deref(), Some(path.as_path()));
    }
}
