use std::collections::HashMap;

use eframe::egui::{vec2, Align2, Color32, FontId, Rect, RichText, Sense, Ui, Vec2};
use npdb_dashboard::data::aggregate::StateSummary;
use npdb_dashboard::view::ViewState;

use super::format;
use crate::color::{ColorScale, NO_DATA};

// ---------------------------------------------------------------------------
// State tile-grid choropleth (central panel, left column)
// ---------------------------------------------------------------------------

const GRID_COLS: u8 = 12;
const GRID_ROWS: u8 = 8;

/// (work state, column, row) on a square tile grid approximating the map.
#[rustfmt::skip]
const TILES: &[(&str, u8, u8)] = &[
    ("AK", 0, 0), ("ME", 11, 0),
    ("WI", 6, 1), ("VT", 10, 1), ("NH", 11, 1),
    ("WA", 1, 2), ("ID", 2, 2), ("MT", 3, 2), ("ND", 4, 2), ("MN", 5, 2),
    ("IL", 6, 2), ("MI", 7, 2), ("NY", 9, 2), ("MA", 10, 2),
    ("OR", 1, 3), ("NV", 2, 3), ("WY", 3, 3), ("SD", 4, 3), ("IA", 5, 3),
    ("IN", 6, 3), ("OH", 7, 3), ("PA", 8, 3), ("NJ", 9, 3), ("CT", 10, 3), ("RI", 11, 3),
    ("CA", 1, 4), ("UT", 2, 4), ("CO", 3, 4), ("NE", 4, 4), ("MO", 5, 4),
    ("KY", 6, 4), ("WV", 7, 4), ("VA", 8, 4), ("MD", 9, 4), ("DE", 10, 4),
    ("AZ", 2, 5), ("NM", 3, 5), ("KS", 4, 5), ("AR", 5, 5), ("TN", 6, 5),
    ("NC", 7, 5), ("SC", 8, 5), ("DC", 9, 5),
    ("OK", 4, 6), ("LA", 5, 6), ("MS", 6, 6), ("AL", 7, 6), ("GA", 8, 6),
    ("HI", 0, 7), ("TX", 4, 7), ("FL", 9, 7), ("PR", 11, 7),
];

fn tile_position(code: &str) -> Option<(u8, u8)> {
    TILES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|&(_, col, row)| (col, row))
}

/// Render the claim-count choropleth for the current view.
pub fn choropleth(ui: &mut Ui, view: &ViewState, scale: Option<&ColorScale>) {
    ui.label(
        RichText::new(format!("# OF MALPRACTICE RECORDS BY STATE, {}", view.range))
            .strong()
            .small(),
    );

    let by_state: HashMap<&str, &StateSummary> =
        view.by_state.iter().map(|s| (s.state.as_str(), s)).collect();

    let tile = (ui.available_width() / f32::from(GRID_COLS)).min(44.0);
    let size = vec2(tile * f32::from(GRID_COLS), tile * f32::from(GRID_ROWS));
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let pointer = response.hover_pos();

    let mut hovered = None;
    for &(code, col, row) in TILES {
        let min = origin + vec2(f32::from(col) * tile, f32::from(row) * tile);
        let rect = Rect::from_min_size(min, Vec2::splat(tile)).shrink(1.5);
        let summary = by_state.get(code).copied();
        let fill = match (summary, scale) {
            (Some(s), Some(scale)) => scale.color_for(s.metrics.claims),
            _ => NO_DATA,
        };

        painter.rect_filled(rect, 3.0, fill);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            code,
            FontId::proportional(tile * 0.3),
            label_color(fill),
        );

        if pointer.is_some_and(|p| rect.contains(p)) {
            hovered = Some((code, summary));
        }
    }

    if let Some((code, summary)) = hovered {
        response.on_hover_ui_at_pointer(|ui| state_tooltip(ui, code, summary));
    }

    if let Some(scale) = scale {
        legend(ui, scale);
    }

    // Territories and military addresses have no tile.
    let off_grid: Vec<String> = view
        .by_state
        .iter()
        .filter(|s| tile_position(&s.state).is_none())
        .map(|s| format!("{} ({})", s.state, format::count(s.metrics.claims)))
        .collect();
    if !off_grid.is_empty() {
        ui.label(RichText::new(format!("Not on map: {}", off_grid.join(", "))).small());
    }
}

fn label_color(fill: Color32) -> Color32 {
    let luma = 0.299 * f32::from(fill.r()) + 0.587 * f32::from(fill.g()) + 0.114 * f32::from(fill.b());
    if luma < 140.0 {
        Color32::WHITE
    } else {
        Color32::from_gray(40)
    }
}

fn state_tooltip(ui: &mut Ui, code: &str, summary: Option<&StateSummary>) {
    ui.strong(code);
    let Some(s) = summary else {
        ui.label("No records in the selected years.");
        return;
    };
    ui.label(format!("# of Practitioners: {}", format::count(s.metrics.practitioners)));
    ui.label(format!("# of Records: {}", format::count(s.metrics.claims)));
    ui.label(format!(
        "Median Payment: {}",
        format::optional_currency(s.metrics.median_payment)
    ));
    ui.label(format!(
        "Median Length: {}",
        format::optional_decimal(s.metrics.median_aa_length)
    ));
}

fn legend(ui: &mut Ui, scale: &ColorScale) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("# of Records").small());
        for (claims, color) in scale.legend_stops(5) {
            let (rect, _) = ui.allocate_exact_size(vec2(14.0, 10.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, color);
            ui.label(RichText::new(format::count(claims)).small());
        }
    });
}
