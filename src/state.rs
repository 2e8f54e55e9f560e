use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use npdb_dashboard::data::loader::load_file;
use npdb_dashboard::data::model::{Dataset, YearRange};
use npdb_dashboard::view::{Dashboard, ViewState};

use crate::color::ColorScale;
use crate::ui::table::TableSort;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset and its current views (None until a file is loaded).
    pub dashboard: Option<Dashboard>,

    /// Year inputs. A disabled input counts as unset and suspends updates.
    pub start_year: i32,
    pub end_year: i32,
    pub start_enabled: bool,
    pub end_enabled: bool,

    /// Choropleth colour scale for the current view.
    pub color_scale: Option<ColorScale>,

    /// Sort order of the per-year/state table.
    pub table_sort: TableSort,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the year inputs to its span.
    /// A dataset without rows clears the inputs instead.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let span = dataset.year_span();
        let empty_message = match dataset.source() {
            Some(path) => format!("{} contains no records", path.display()),
            None => "The dataset contains no records".to_string(),
        };
        self.dashboard = Some(Dashboard::new(Arc::new(dataset)));
        match span {
            Some(span) => {
                self.start_year = span.start;
                self.end_year = span.end;
                self.start_enabled = true;
                self.end_enabled = true;
                self.status_message = None;
            }
            None => {
                self.start_year = 0;
                self.end_year = 0;
                self.start_enabled = false;
                self.end_enabled = false;
                self.status_message = Some(empty_message);
            }
        }
        self.rebuild_color_scale();
    }

    /// Override the year inputs, keeping the current value where `None`.
    pub fn set_years(&mut self, start: Option<i32>, end: Option<i32>) {
        if let Some(start) = start {
            self.start_year = start;
        }
        if let Some(end) = end {
            self.end_year = end;
        }
        self.refresh();
    }

    /// The year inputs as the dashboard sees them.
    pub fn year_inputs(&self) -> (Option<i32>, Option<i32>) {
        (
            self.start_enabled.then_some(self.start_year),
            self.end_enabled.then_some(self.end_year),
        )
    }

    /// Years present in the loaded dataset.
    pub fn year_bounds(&self) -> Option<YearRange> {
        self.dashboard.as_ref().and_then(|d| d.dataset().year_span())
    }

    pub fn view(&self) -> Option<&ViewState> {
        self.dashboard.as_ref().and_then(Dashboard::view)
    }

    /// Push the year inputs through the dashboard. Cheap when nothing changed.
    pub fn refresh(&mut self) {
        let (start, end) = self.year_inputs();
        let recomputed = self
            .dashboard
            .as_mut()
            .is_some_and(|d| d.update(start, end));
        if recomputed {
            self.rebuild_color_scale();
        }
    }

    fn rebuild_color_scale(&mut self) {
        self.color_scale = self.view().map(|v| ColorScale::for_claims(&v.by_state));
    }

    /// Load a file chosen in the UI. Failures keep the current dataset.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Write the current views to `path` as pretty JSON.
    pub fn export_view(&self, path: &Path) -> Result<()> {
        let view = self.view().context("no views to export")?;
        let json = view.to_json_pretty().context("serializing views")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported views for {} to {}", view.range, path.display());
        Ok(())
    }
}
