use std::cmp::Ordering;

use eframe::egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use npdb_dashboard::data::aggregate::GeoYearSummary;

use super::format;

// ---------------------------------------------------------------------------
// Sort state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Year,
    State,
    Practitioners,
    Claims,
    MedianPayment,
    MedianLength,
}

/// Column the table is sorted on. Clicking the active header flips the
/// direction; clicking another header sorts ascending on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableSort {
    pub column: SortColumn,
    pub descending: bool,
}

impl TableSort {
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.descending = !self.descending;
        } else {
            self.column = column;
            self.descending = false;
        }
    }

    /// Rows in display order. The sort is stable, so ties keep the
    /// (year, state) order of the aggregate.
    pub fn order<'a>(&self, rows: &'a [GeoYearSummary]) -> Vec<&'a GeoYearSummary> {
        let mut ordered: Vec<&GeoYearSummary> = rows.iter().collect();
        ordered.sort_by(|a, b| {
            let ord = self.compare(a, b);
            if self.descending {
                ord.reverse()
            } else {
                ord
            }
        });
        ordered
    }

    fn compare(&self, a: &GeoYearSummary, b: &GeoYearSummary) -> Ordering {
        // Missing medians sort before every value.
        fn by_opt(a: Option<f64>, b: Option<f64>) -> Ordering {
            match (a, b) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (a, b) => a.is_some().cmp(&b.is_some()),
            }
        }
        match self.column {
            SortColumn::Year => a.year.cmp(&b.year),
            SortColumn::State => a.state.cmp(&b.state),
            SortColumn::Practitioners => a.metrics.practitioners.cmp(&b.metrics.practitioners),
            SortColumn::Claims => a.metrics.claims.cmp(&b.metrics.claims),
            SortColumn::MedianPayment => by_opt(a.metrics.median_payment, b.metrics.median_payment),
            SortColumn::MedianLength => by_opt(a.metrics.median_aa_length, b.metrics.median_aa_length),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-(year, state) table (central panel, bottom)
// ---------------------------------------------------------------------------

const HEADERS: [(SortColumn, &str, &str); 6] = [
    (
        SortColumn::Year,
        "Year",
        "Year that malpractice/adverse action case record was reported",
    ),
    (SortColumn::State, "State", "Practitioners' work state"),
    (
        SortColumn::Practitioners,
        "# of Practitioners",
        "Total number of unique practitioners with an associated malpractice claim",
    ),
    (SortColumn::Claims, "# of Records", "Total number of malpractice claims"),
    (
        SortColumn::MedianPayment,
        "Median Payment",
        "Median amount paid by malpractice insurer for practitioner's claim",
    ),
    (
        SortColumn::MedianLength,
        "Median Length",
        "Median length of adverse action penalty in years",
    ),
];

pub fn geo_year_table(ui: &mut Ui, rows: &[GeoYearSummary], sort: &mut TableSort) {
    if rows.is_empty() {
        ui.label("No records in the selected years.");
        return;
    }

    let ordered = sort.order(rows);

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::exact(50.0))
        .column(Column::exact(50.0))
        .columns(Column::auto().at_least(120.0), 4)
        .min_scrolled_height(0.0)
        .max_scroll_height(270.0)
        .header(22.0, |mut header| {
            for (column, name, tooltip) in HEADERS {
                header.col(|ui| {
                    let marker = match (sort.column == column, sort.descending) {
                        (true, false) => " ▲",
                        (true, true) => " ▼",
                        (false, _) => "",
                    };
                    let text = RichText::new(format!("{name}{marker}")).strong();
                    if ui
                        .selectable_label(sort.column == column, text)
                        .on_hover_text(tooltip)
                        .clicked()
                    {
                        sort.toggle(column);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(18.0, ordered.len(), |mut row| {
                let r = ordered[row.index()];
                row.col(|ui| {
                    ui.strong(r.year.to_string());
                });
                row.col(|ui| {
                    ui.strong(&r.state);
                });
                row.col(|ui| {
                    ui.label(format::count(r.metrics.practitioners));
                });
                row.col(|ui| {
                    ui.label(format::count(r.metrics.claims));
                });
                row.col(|ui| {
                    ui.label(format::optional_currency(r.metrics.median_payment));
                });
                row.col(|ui| {
                    ui.label(format::optional_decimal(r.metrics.median_aa_length));
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use npdb_dashboard::data::aggregate::GroupMetrics;

    use super::*;

    fn row(year: i32, state: &str, claims: usize, median_payment: Option<f64>) -> GeoYearSummary {
        GeoYearSummary {
            year,
            state: state.to_string(),
            metrics: GroupMetrics {
                practitioners: 1,
                claims,
                median_payment,
                median_aa_length: None,
            },
        }
    }

    fn keys(rows: &[&GeoYearSummary]) -> Vec<(i32, String)> {
        rows.iter().map(|r| (r.year, r.state.clone())).collect()
    }

    #[test]
    fn toggle_flips_then_switches_column() {
        let mut sort = TableSort::default();
        sort.toggle(SortColumn::Year);
        assert!(sort.descending);
        sort.toggle(SortColumn::Claims);
        assert_eq!(sort.column, SortColumn::Claims);
        assert!(!sort.descending);
    }

    #[test]
    fn sorts_by_claims_descending_with_stable_ties() {
        let rows = vec![
            row(2003, "CA", 5, None),
            row(2003, "NY", 9, None),
            row(2004, "CA", 5, None),
        ];
        let sort = TableSort {
            column: SortColumn::Claims,
            descending: true,
        };
        let ordered = sort.order(&rows);
        assert_eq!(
            keys(&ordered),
            vec![
                (2003, "NY".to_string()),
                (2003, "CA".to_string()),
                (2004, "CA".to_string())
            ]
        );
    }

    #[test]
    fn missing_medians_sort_first() {
        let rows = vec![row(2003, "CA", 1, Some(50.0)), row(2003, "NY", 1, None)];
        let sort = TableSort {
            column: SortColumn::MedianPayment,
            descending: false,
        };
        assert_eq!(sort.order(&rows)[0].state, "NY");
    }
}
