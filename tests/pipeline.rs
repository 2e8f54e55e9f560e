use std::fs;
use std::sync::Arc;

use npdb_dashboard::data::aggregate::{
    count_by_allegation, summarize_by_geo_year, summarize_national,
};
use npdb_dashboard::data::filter::filter;
use npdb_dashboard::data::loader::load_file;
use npdb_dashboard::data::model::{Dataset, YearRange};
use npdb_dashboard::view::{Dashboard, ViewState};
use tempfile::TempDir;

const SCENARIO: &str = "\
SEQNO,ORIGYEAR,PRACTNUM,WORKSTAT,TOTALPMT,AALENGTH,ALGNNATR,OUTCOME
1,2003,1,CA,$100.00,,1,1
2,2004,1,CA,$200.00,,1,9
3,2004,2,NY,$300.00,,55,9
";

fn scenario() -> (TempDir, Dataset) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("scenario.csv");
    fs::write(&path, SCENARIO).expect("write");
    let dataset = load_file(&path).expect("load");
    (dir, dataset)
}

#[test]
fn single_year_scenario() {
    let (_dir, dataset) = scenario();
    let selected = filter(dataset.records(), 2004, 2004);
    assert_eq!(selected.len(), 2);

    let geo = summarize_by_geo_year(selected.iter().copied());
    let ca = geo
        .iter()
        .find(|r| r.year == 2004 && r.state == "CA")
        .expect("2004 CA row");
    assert_eq!(ca.metrics.practitioners, 1);
    assert_eq!(ca.metrics.claims, 1);
    assert_eq!(ca.metrics.median_payment, Some(200.0));

    let national = summarize_national(selected.iter().copied());
    assert_eq!(national.claims, 2);
    assert_eq!(national.practitioners, 2);
    assert_eq!(national.total_payment, 500.0);
}

#[test]
fn unknown_allegation_code_is_counted_not_dropped() {
    let (_dir, dataset) = scenario();
    let counts = count_by_allegation(dataset.records());
    assert_eq!(counts.len(), 2);
    assert_eq!((counts[0].abbr, counts[0].description, counts[0].count), ("DR", "Diagnosis Related", 2));
    assert!(counts[1].is_unknown());
    assert_eq!((counts[1].description, counts[1].count), ("Unknown", 1));
}

#[test]
fn practitioners_never_exceed_claims_per_group() {
    let (_dir, dataset) = scenario();
    for row in summarize_by_geo_year(dataset.records()) {
        assert!(row.metrics.practitioners <= row.metrics.claims);
    }
}

#[test]
fn view_state_is_consistent_across_views() {
    let (_dir, dataset) = scenario();
    let view = ViewState::compute(dataset.records(), YearRange::new(2003, 2004));

    let geo_claims: usize = view.by_geo_year.iter().map(|r| r.metrics.claims).sum();
    let state_claims: usize = view.by_state.iter().map(|r| r.metrics.claims).sum();
    let allegation_claims: usize = view.allegations.iter().map(|c| c.count).sum();
    let outcome_claims: usize = view.outcomes.iter().map(|c| c.count).sum();

    assert_eq!(view.national.claims, 3);
    assert_eq!(geo_claims, 3);
    assert_eq!(state_claims, 3);
    assert_eq!(allegation_claims, 3);
    assert_eq!(outcome_claims, 3);
    assert_eq!(view.national.total_payment, 600.0);
}

#[test]
fn dashboard_follows_the_year_inputs() {
    let (_dir, dataset) = scenario();
    let mut dash = Dashboard::new(Arc::new(dataset));
    assert_eq!(dash.view().map(|v| v.national.records), Some(3));

    assert!(dash.update(Some(2004), Some(2004)));
    assert_eq!(dash.view().map(|v| v.national.records), Some(2));

    // Clearing an input suspends updates.
    assert!(!dash.update(None, Some(2003)));
    assert_eq!(dash.view().map(|v| v.range), Some(YearRange::single(2004)));

    assert!(dash.update(Some(2005), Some(2003)));
    assert_eq!(dash.view().map(|v| v.national.records), Some(0));
}
