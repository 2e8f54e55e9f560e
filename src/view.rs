//! The recomputation pipeline: `view = aggregate(filter(dataset, range))`.

use std::sync::Arc;

use serde::Serialize;

use crate::data::aggregate::{
    count_by_allegation, count_by_outcome, summarize_by_geo_year, summarize_by_state,
    summarize_national, GeoYearSummary, LabeledCount, NationalSummary, StateSummary,
};
use crate::data::filter::filter_range;
use crate::data::model::{Dataset, Record, YearRange};

// ---------------------------------------------------------------------------
// ViewState – every derived view for one year range
// ---------------------------------------------------------------------------

/// All derived views for one year range, computed together from a single
/// selection so they are always mutually consistent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub range: YearRange,
    pub national: NationalSummary,
    pub by_geo_year: Vec<GeoYearSummary>,
    pub by_state: Vec<StateSummary>,
    pub allegations: Vec<LabeledCount>,
    pub outcomes: Vec<LabeledCount>,
}

impl ViewState {
    pub fn compute(records: &[Record], range: YearRange) -> Self {
        let selected = filter_range(records, range);
        log::debug!("Recomputing views for {range}: {} records", selected.len());
        ViewState {
            range,
            national: summarize_national(selected.iter().copied()),
            by_geo_year: summarize_by_geo_year(selected.iter().copied()),
            by_state: summarize_by_state(selected.iter().copied()),
            allegations: count_by_allegation(selected.iter().copied()),
            outcomes: count_by_outcome(selected.iter().copied()),
        }
    }

    /// Serialize for export.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Dashboard – explicit controller over the immutable dataset
// ---------------------------------------------------------------------------

/// Holds the loaded dataset and the views for the last applied range.
///
/// The view is only replaced by [`Dashboard::update`]; an incomplete range
/// leaves the previous view untouched.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    view: Option<ViewState>,
}

impl Dashboard {
    /// Start with views over the dataset's full year span.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let view = dataset
            .year_span()
            .map(|span| ViewState::compute(dataset.records(), span));
        Dashboard { dataset, view }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Views for the last complete range, `None` before the first one.
    pub fn view(&self) -> Option<&ViewState> {
        self.view.as_ref()
    }

    /// Apply the year inputs. Returns `true` if the views were recomputed.
    ///
    /// Nothing happens when either endpoint is unset, or when the range is
    /// the one already shown.
    pub fn update(&mut self, start_year: Option<i32>, end_year: Option<i32>) -> bool {
        let (Some(start), Some(end)) = (start_year, end_year) else {
            return false;
        };
        let range = YearRange::new(start, end);
        if self.view.as_ref().is_some_and(|v| v.range == range) {
            return false;
        }
        self.view = Some(ViewState::compute(self.dataset.records(), range));
        true
    }
}
