// OncoViz - app/state.rs
//
// Application state management. Holds the base table, the current
// selection, and the derived tables for the active render pass.
// Owned by the eframe::App implementation.

use crate::core::model::{Dataset, Selection};
use crate::core::tabulate::{
    self, AgeCount, GenderCount, TypeCount, TypeShare, YearCount, YearGenderCount,
};
use crate::util::constants::{RANKING_TOP_TYPES, SHARE_TOP_TYPES};
use std::path::PathBuf;

/// All derived tables for one render pass.
///
/// Recomputed in full from the base table whenever the selection (or the
/// dataset) changes; nothing here is cached across changes.
#[derive(Debug, Default)]
pub struct DerivedTables {
    /// Top types + "Other" for the share donut (selection-sensitive).
    pub type_shares: Vec<TypeShare>,

    /// Cases per year, after the trend baseline.
    pub annual: Vec<YearCount>,

    /// Cases per (year, gender), after the trend baseline.
    pub annual_by_gender: Vec<YearGenderCount>,

    /// Latest-year cases per gender.
    pub gender_split: Vec<GenderCount>,

    /// Latest-year cases per age bracket.
    pub age_profile: Vec<AgeCount>,

    /// Latest-year top types + "Other" for the ranking bars.
    pub type_ranking: Vec<TypeCount>,
}

impl DerivedTables {
    /// One full batch recomputation from the base table.
    ///
    /// Only the share view honours the selection; every other view is
    /// derived from the unfiltered base table.
    pub fn compute(dataset: &Dataset, selection: &Selection) -> Self {
        let latest_all = tabulate::latest_year_slice(dataset, &Selection::default());
        let latest_selected = tabulate::latest_year_slice(dataset, selection);
        let trend = tabulate::trend_slice(dataset);

        Self {
            type_shares: tabulate::type_shares(&latest_selected, SHARE_TOP_TYPES),
            annual: tabulate::annual_totals(&trend),
            annual_by_gender: tabulate::annual_totals_by_gender(&trend),
            gender_split: tabulate::gender_split(&latest_all),
            age_profile: tabulate::age_profile(&latest_all),
            type_ranking: tabulate::type_ranking(&latest_all, RANKING_TOP_TYPES),
        }
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// The base table. Read-only after load.
    pub dataset: Dataset,

    /// Path the base table was loaded from.
    pub data_path: Option<PathBuf>,

    /// Current selector state (gender / age bracket).
    pub selection: Selection,

    /// Derived tables for the current render pass.
    pub tables: DerivedTables,

    /// Status message for the status bar.
    pub status_message: String,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Dark colour scheme active.
    pub dark_mode: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state around a loaded dataset.
    pub fn new(dataset: Dataset, data_path: Option<PathBuf>, debug_mode: bool) -> Self {
        let selection = Selection::default();
        let tables = DerivedTables::compute(&dataset, &selection);
        let status_message = format!(
            "{} records loaded. Latest year: {}.",
            dataset.len(),
            dataset.latest_year()
        );
        Self {
            dataset,
            data_path,
            selection,
            tables,
            status_message,
            show_about: false,
            dark_mode: true,
            debug_mode,
        }
    }

    /// Recompute all derived tables from the base table and the current
    /// selection. Called after every selector change.
    pub fn apply_selection(&mut self) {
        self.tables = DerivedTables::compute(&self.dataset, &self.selection);
        tracing::debug!(
            gender = ?self.selection.gender,
            age = ?self.selection.age,
            shares = self.tables.type_shares.len(),
            "Derived tables recomputed"
        );
    }

    /// Swap in a freshly loaded dataset and reset the selection.
    ///
    /// The age selector options come from the new dataset, so a stale
    /// age filter must not survive the swap.
    pub fn replace_dataset(&mut self, dataset: Dataset, path: PathBuf) {
        self.dataset = dataset;
        self.data_path = Some(path);
        self.selection = Selection::default();
        self.apply_selection();
        self.status_message = format!(
            "{} records loaded. Latest year: {}.",
            self.dataset.len(),
            self.dataset.latest_year()
        );
    }
}
