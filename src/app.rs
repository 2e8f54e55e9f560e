use eframe::egui;
use npdb_dashboard::view::Dashboard;

use crate::state::AppState;
use crate::ui::{charts, map, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NpdbDashboardApp {
    pub state: AppState,
}

impl NpdbDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for NpdbDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year range + nationwide summary ----
        egui::SidePanel::left("summary_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // Inputs are applied once per frame, after every widget that can
        // change them has run.
        self.state.refresh();

        // ---- Central panel: map, charts, table ----
        let AppState {
            dashboard,
            color_scale,
            table_sort,
            ..
        } = &mut self.state;
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(view) = dashboard.as_ref().and_then(Dashboard::view) else {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a dataset to begin  (File → Open…)");
                });
                return;
            };

            ui.columns(2, |cols| {
                map::choropleth(&mut cols[0], view, color_scale.as_ref());
                charts::allegation_chart(&mut cols[1], &view.allegations);
                cols[1].add_space(8.0);
                charts::outcome_chart(&mut cols[1], &view.outcomes);
            });
            ui.separator();
            table::geo_year_table(ui, &view.by_geo_year, table_sort);
        });
    }
}
