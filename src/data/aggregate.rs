//! Reducers from a record selection to the dashboard's derived tables.
//!
//! Every function takes any iterator of `&Record`, so it works equally on a
//! whole dataset slice and on the `Vec<&Record>` returned by
//! [`filter`](super::filter::filter). None of them mutate their input.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::codes::{
    CodeLabel, CodeTable, ALLEGATION_TYPES, OUTCOME_SEVERITIES, UNKNOWN_ABBR, UNKNOWN_DESCRIPTION,
};
use super::model::Record;

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

/// The four metrics shared by the grouped views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMetrics {
    /// Distinct practitioners.
    pub practitioners: usize,
    /// Distinct claims.
    pub claims: usize,
    /// Median payment (typical claim cost). `None` if no record had one.
    pub median_payment: Option<f64>,
    /// Median adverse action length in years.
    pub median_aa_length: Option<f64>,
}

/// One row per (year, state) pair present in the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoYearSummary {
    pub year: i32,
    pub state: String,
    #[serde(flatten)]
    pub metrics: GroupMetrics,
}

/// One row per state, the data behind the choropleth map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    pub state: String,
    #[serde(flatten)]
    pub metrics: GroupMetrics,
}

/// Nationwide figures over the whole selection.
///
/// Unlike the grouped views this carries the *sum* of payments (total system
/// cost), not the median.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationalSummary {
    pub records: usize,
    pub claims: usize,
    pub practitioners: usize,
    pub total_payment: f64,
    pub median_aa_length: Option<f64>,
}

/// Distinct claim count for one allegation or outcome category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledCount {
    /// Source code, `None` for the unknown bucket.
    pub code: Option<i64>,
    pub abbr: &'static str,
    pub description: &'static str,
    pub count: usize,
}

impl LabeledCount {
    pub fn is_unknown(&self) -> bool {
        self.code.is_none()
    }
}

// ---------------------------------------------------------------------------
// Statistics helpers
// ---------------------------------------------------------------------------

/// Sample median: the mean of the two central values for even lengths.
/// Sorts `values` in place.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Round to two decimal places for display.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Default)]
struct GroupAccumulator {
    practitioners: HashSet<u64>,
    claims: HashSet<u64>,
    payments: Vec<f64>,
    aa_lengths: Vec<f64>,
}

impl GroupAccumulator {
    fn push(&mut self, record: &Record) {
        self.practitioners.insert(record.practitioner_id);
        self.claims.insert(record.claim_id);
        self.payments.extend(record.payment);
        self.aa_lengths.extend(record.aa_length);
    }

    fn finish(mut self) -> GroupMetrics {
        GroupMetrics {
            practitioners: self.practitioners.len(),
            claims: self.claims.len(),
            median_payment: median(&mut self.payments),
            median_aa_length: median(&mut self.aa_lengths),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregators
// ---------------------------------------------------------------------------

/// Group by (year, state). Rows are ordered by year, then state code.
/// Records without a work state are left out, as they cannot be placed.
pub fn summarize_by_geo_year<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<GeoYearSummary> {
    let mut groups: BTreeMap<(i32, &str), GroupAccumulator> = BTreeMap::new();
    for record in records {
        if let Some(state) = record.work_state.as_deref() {
            groups.entry((record.year, state)).or_default().push(record);
        }
    }
    groups
        .into_iter()
        .map(|((year, state), acc)| GeoYearSummary {
            year,
            state: state.to_string(),
            metrics: acc.finish(),
        })
        .collect()
}

/// Group by state only, ordered by state code.
pub fn summarize_by_state<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<StateSummary> {
    let mut groups: BTreeMap<&str, GroupAccumulator> = BTreeMap::new();
    for record in records {
        if let Some(state) = record.work_state.as_deref() {
            groups.entry(state).or_default().push(record);
        }
    }
    groups
        .into_iter()
        .map(|(state, acc)| StateSummary {
            state: state.to_string(),
            metrics: acc.finish(),
        })
        .collect()
}

/// One summary over the whole selection, regardless of state or year.
pub fn summarize_national<'a>(records: impl IntoIterator<Item = &'a Record>) -> NationalSummary {
    let mut count = 0;
    let mut total_payment = 0.0;
    let mut acc = GroupAccumulator::default();
    for record in records {
        count += 1;
        total_payment += record.payment.unwrap_or(0.0);
        acc.push(record);
    }
    let metrics = acc.finish();
    NationalSummary {
        records: count,
        claims: metrics.claims,
        practitioners: metrics.practitioners,
        total_payment,
        median_aa_length: metrics.median_aa_length,
    }
}

/// Distinct claims per allegation type.
pub fn count_by_allegation<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<LabeledCount> {
    count_by_code(records, &ALLEGATION_TYPES, |r| r.allegation)
}

/// Distinct claims per outcome severity.
pub fn count_by_outcome<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<LabeledCount> {
    count_by_code(records, &OUTCOME_SEVERITIES, |r| r.outcome)
}

/// Grouping key for coded counts. Known labels sort by (abbreviation,
/// description); the unknown bucket sorts last.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Bucket {
    Known {
        abbr: &'static str,
        description: &'static str,
        code: i64,
    },
    Unknown,
}

impl From<&'static CodeLabel> for Bucket {
    fn from(label: &'static CodeLabel) -> Self {
        Bucket::Known {
            abbr: label.abbr,
            description: label.description,
            code: label.code,
        }
    }
}

fn count_by_code<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    table: &CodeTable,
    code_of: impl Fn(&Record) -> Option<i64>,
) -> Vec<LabeledCount> {
    let mut groups: BTreeMap<Bucket, HashSet<u64>> = BTreeMap::new();
    let mut unmapped: BTreeMap<Option<i64>, usize> = BTreeMap::new();

    for record in records {
        let code = code_of(record);
        let bucket = match code.and_then(|c| table.lookup(c)) {
            Some(label) => Bucket::from(label),
            None => {
                *unmapped.entry(code).or_default() += 1;
                Bucket::Unknown
            }
        };
        groups.entry(bucket).or_default().insert(record.claim_id);
    }

    for (code, n) in &unmapped {
        match code {
            Some(code) => log::warn!("{n} records with unmapped {} code {code}", table.name),
            None => log::warn!("{n} records with blank {} code", table.name),
        }
    }

    groups
        .into_iter()
        .map(|(bucket, claims)| match bucket {
            Bucket::Known {
                abbr,
                description,
                code,
            } => LabeledCount {
                code: Some(code),
                abbr,
                description,
                count: claims.len(),
            },
            Bucket::Unknown => LabeledCount {
                code: None,
                abbr: UNKNOWN_ABBR,
                description: UNKNOWN_DESCRIPTION,
                count: claims.len(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn coded(claim_id: u64, allegation: Option<i64>, outcome: Option<i64>) -> Record {
        Record {
            allegation,
            outcome,
            ..record(claim_id, 2004, claim_id, "CA", 1.0)
        }
    }

    #[test]
    fn median_of_odd_and_even_lengths() {
        assert_eq!(median(&mut []), None);
        assert_eq!(median(&mut [3.0]), Some(3.0));
        assert_eq!(median(&mut [5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn round_cents_keeps_two_decimals() {
        assert_eq!(round_cents(1234.5678), 1234.57);
        assert_eq!(round_cents(2.5), 2.5);
    }

    #[test]
    fn geo_year_groups_are_ordered_and_skip_blank_states() {
        let mut no_state = record(9, 2004, 9, "CA", 1.0);
        no_state.work_state = None;
        let records = vec![
            record(1, 2004, 1, "NY", 10.0),
            record(2, 2003, 1, "NY", 20.0),
            record(3, 2004, 2, "CA", 30.0),
            no_state,
        ];
        let rows = summarize_by_geo_year(&records);
        let keys: Vec<(i32, &str)> = rows.iter().map(|r| (r.year, r.state.as_str())).collect();
        assert_eq!(keys, vec![(2003, "NY"), (2004, "CA"), (2004, "NY")]);
    }

    #[test]
    fn group_metrics_count_distinct_and_take_medians() {
        let mut records = vec![
            record(1, 2004, 1, "CA", 100.0),
            record(2, 2004, 1, "CA", 300.0),
            record(2, 2004, 1, "CA", 300.0),
            record(3, 2004, 2, "CA", 1000.0),
        ];
        records[0].aa_length = Some(1.0);
        records[3].aa_length = Some(2.0);
        let rows = summarize_by_geo_year(&records);
        assert_eq!(rows.len(), 1);
        let m = &rows[0].metrics;
        assert_eq!(m.practitioners, 2);
        assert_eq!(m.claims, 3);
        assert_eq!(m.median_payment, Some(300.0));
        assert_eq!(m.median_aa_length, Some(1.5));
        assert!(m.practitioners <= m.claims);
    }

    #[test]
    fn missing_values_do_not_enter_medians() {
        let mut records = vec![record(1, 2004, 1, "CA", 0.0)];
        records[0].payment = None;
        let rows = summarize_by_state(&records);
        assert_eq!(rows[0].metrics.median_payment, None);
        assert_eq!(rows[0].metrics.median_aa_length, None);
        assert_eq!(rows[0].metrics.claims, 1);
    }

    #[test]
    fn national_summary_sums_payments() {
        let mut no_state = record(4, 2004, 3, "CA", 0.25);
        no_state.work_state = None;
        let records = vec![
            record(1, 2004, 1, "CA", 100.5),
            record(2, 2004, 1, "CA", 200.25),
            record(3, 2004, 2, "NY", 300.0),
            no_state,
        ];
        let national = summarize_national(&records);
        assert_eq!(national.records, 4);
        assert_eq!(national.claims, 4);
        assert_eq!(national.practitioners, 3);
        assert_eq!(national.total_payment, 100.5 + 200.25 + 300.0 + 0.25);
    }

    #[test]
    fn national_summary_of_nothing_is_zero() {
        let national = summarize_national(&[]);
        assert_eq!(national.records, 0);
        assert_eq!(national.total_payment, 0.0);
        assert_eq!(national.median_aa_length, None);
    }

    #[test]
    fn allegation_counts_label_codes_and_keep_unknowns() {
        let records = vec![
            coded(1, Some(1), None),
            coded(2, Some(1), None),
            coded(2, Some(1), None),
            coded(3, Some(30), None),
            coded(4, Some(70), None),
            coded(5, Some(55), None),
            coded(6, None, None),
        ];
        let counts = count_by_allegation(&records);
        let rows: Vec<(&str, &str, usize)> = counts
            .iter()
            .map(|c| (c.abbr, c.description, c.count))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("DR", "Diagnosis Related", 2),
                ("MR", "Medication Related", 1),
                ("MR", "Monitoring Related", 1),
                ("UNK", "Unknown", 2),
            ]
        );
        assert!(counts.last().is_some_and(LabeledCount::is_unknown));
        let total: usize = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn outcome_counts_use_outcome_table() {
        let records = vec![coded(1, None, Some(9)), coded(2, None, Some(9)), coded(3, None, Some(1))];
        let counts = count_by_outcome(&records);
        assert_eq!(counts.len(), 2);
        assert_eq!((counts[0].abbr, counts[0].count), ("DE", 2));
        assert_eq!((counts[1].abbr, counts[1].count), ("EM", 1));
        assert_eq!(counts[0].code, Some(9));
    }
}
