use std::path::Path;

use crate::config::DatasetPaths;
use crate::data::Datasets;
use crate::metrics::Report;
use crate::ui::plot::ChartKind;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded tables (None until the user opens a dataset location).
    pub datasets: Option<Datasets>,

    /// Derived metrics, recomputed whenever the datasets are (re)loaded.
    pub report: Option<Report>,

    /// Chart shown in the central panel.
    pub selected_chart: ChartKind,

    /// Whether the values panel below the chart is open.
    pub show_values: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            datasets: None,
            report: None,
            selected_chart: ChartKind::TuitionByYear,
            show_values: false,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Run the whole entry sequence for a dataset location (a directory or a
    /// JSON config file): resolve paths, load all tables, compute all
    /// metrics.  On failure the previous state is kept and the error shown.
    pub fn load_path(&mut self, path: &Path) {
        self.loading = true;
        match load_and_compute(path) {
            Ok((datasets, report)) => {
                log::info!("Loaded datasets and computed report from {}", path.display());
                self.datasets = Some(datasets);
                self.report = Some(report);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
        self.loading = false;
    }
}

fn load_and_compute(path: &Path) -> anyhow::Result<(Datasets, Report)> {
    let paths = DatasetPaths::resolve(path)?;
    let datasets = Datasets::load(&paths)?;
    let report = Report::compute(&datasets)?;
    Ok((datasets, report))
}
