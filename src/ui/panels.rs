use eframe::egui::{self, Color32, Grid, RichText, ScrollArea, Ui};

use super::format;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – year range and nationwide summary
// ---------------------------------------------------------------------------

/// Render the left panel: year inputs, the nationwide card and a short
/// description of the data.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Medical Malpractice in the United States");
    ui.separator();

    let Some(bounds) = state.year_bounds() else {
        if state.dashboard.is_some() {
            ui.label("The loaded file contains no records.");
        } else {
            ui.label("No dataset loaded.");
        }
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            ui.strong("Cases reported between");
            let years = bounds.start..=bounds.end;
            year_input(ui, "From", &mut state.start_year, &mut state.start_enabled, years.clone());
            year_input(ui, "To", &mut state.end_year, &mut state.end_enabled, years);
            if !(state.start_enabled && state.end_enabled) {
                ui.label(
                    RichText::new("Set both years to update the dashboard.")
                        .small()
                        .color(Color32::YELLOW),
                );
            } else if state.start_year > state.end_year {
                ui.label(
                    RichText::new("Start year is after end year: nothing selected.")
                        .small()
                        .color(Color32::YELLOW),
                );
            }
            ui.separator();

            // ---- Nationwide summary ----
            if let Some(view) = state.view() {
                let national = &view.national;
                ui.strong(format!("Across all U.S. states, {}", view.range));
                Grid::new("national_summary")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.label("# OF MALPRACTICE CLAIMS:");
                        ui.strong(format::count(national.claims));
                        ui.end_row();

                        ui.label("# OF LIABLE PRACTITIONERS:");
                        ui.strong(format::count(national.practitioners));
                        ui.end_row();

                        ui.label("TOTAL MALPRACTICE PAYMENT:");
                        ui.strong(format::currency_whole(national.total_payment));
                        ui.end_row();

                        ui.label("MEDIAN ADVERSE EVENT LENGTH:");
                        ui.strong(format::optional_decimal(national.median_aa_length));
                        ui.end_row();
                    });
                ui.label(
                    RichText::new(
                        "Payment here is the total paid across all claims; \
                         the state table and map show the median payment per claim.",
                    )
                    .small()
                    .italics(),
                );
            }
            ui.separator();

            // ---- About ----
            egui::CollapsingHeader::new(RichText::new("About the data").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.label(
                        "Malpractice payment and adverse action reports from the \
                         National Practitioner Data Bank public use file. Each record \
                         is one report; practitioners are identified only by an \
                         anonymous number.",
                    );
                    ui.label(
                        "Choose the first and last report year on the left. The map, \
                         charts, summary and table all update together.",
                    );
                });
        });
}

/// A year field clamped to the dataset span, with a checkbox that unsets it.
fn year_input(
    ui: &mut Ui,
    label: &str,
    year: &mut i32,
    enabled: &mut bool,
    range: std::ops::RangeInclusive<i32>,
) {
    ui.horizontal(|ui: &mut Ui| {
        ui.checkbox(enabled, label);
        ui.add_enabled(*enabled, egui::DragValue::new(year).range(range).speed(0.1));
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.view().is_some(), egui::Button::new("Export view as JSON…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dashboard) = &state.dashboard {
            let visible = dashboard.view().map_or(0, |v| v.national.records);
            ui.label(format!(
                "{} records loaded, {} in range",
                format::count(dashboard.dataset().len()),
                format::count(visible)
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open NPDB data")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard view")
        .add_filter("JSON", &["json"])
        .set_file_name("npdb_view.json")
        .save_file();

    if let Some(path) = file {
        match state.export_view(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export view: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
