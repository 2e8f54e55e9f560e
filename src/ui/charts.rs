use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};
use npdb_dashboard::data::aggregate::LabeledCount;

use super::format;

// ---------------------------------------------------------------------------
// Claim-count bar charts (central panel, right column)
// ---------------------------------------------------------------------------

const ALLEGATION_COLOR: Color32 = Color32::from_rgb(87, 167, 113);
const OUTCOME_COLOR: Color32 = Color32::from_rgb(160, 56, 43);

pub fn allegation_chart(ui: &mut Ui, counts: &[LabeledCount]) {
    labeled_count_chart(
        ui,
        "allegation_chart",
        "# OF MALPRACTICE CLAIMS BY ALLEGATION TYPE",
        "Allegation Type",
        counts,
        ALLEGATION_COLOR,
    );
}

pub fn outcome_chart(ui: &mut Ui, counts: &[LabeledCount]) {
    labeled_count_chart(
        ui,
        "outcome_chart",
        "# OF MALPRACTICE CLAIMS BY SEVERITY OF INJURY",
        "Outcome Type",
        counts,
        OUTCOME_COLOR,
    );
}

/// One bar per category, labelled with its abbreviation on the x axis.
/// Hovering a bar shows the full description and the claim count.
fn labeled_count_chart(
    ui: &mut Ui,
    id: &str,
    title: &str,
    category: &'static str,
    counts: &[LabeledCount],
    color: Color32,
) {
    ui.label(RichText::new(title).strong().small());

    if counts.is_empty() {
        ui.label("No claims in the selected years.");
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.count as f64)
                .name(c.description)
                .fill(if c.is_unknown() { Color32::GRAY } else { color })
                .width(0.7)
        })
        .collect();

    let abbrs: Vec<&'static str> = counts.iter().map(|c| c.abbr).collect();

    let chart = BarChart::new(bars).element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
        format!(
            "{category}: {}\n# of Claims: {}",
            bar.name,
            format::group_thousands(bar.value as u64)
        )
    }));

    Plot::new(id)
        .height(220.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show_grid([false, true])
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            abbrs.get(idx as usize).map(|a| a.to_string()).unwrap_or_default()
        })
        .y_axis_formatter(|mark, _range| {
            if mark.value < 0.0 || mark.value.fract() != 0.0 {
                return String::new();
            }
            format::group_thousands(mark.value as u64)
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
