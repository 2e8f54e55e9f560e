use eframe::egui::Color32;
use npdb_dashboard::data::aggregate::StateSummary;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Sequential colour scale for the choropleth
// ---------------------------------------------------------------------------

/// Light end of the claim-count scale.
const LOW: (u8, u8, u8) = (246, 210, 169);
/// Dark end of the claim-count scale.
const HIGH: (u8, u8, u8) = (172, 37, 90);

/// Tile colour for states with no claims in range.
pub const NO_DATA: Color32 = Color32::from_gray(215);

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Interpolate between the two ends in linear RGB. `t` is clamped to [0, 1].
pub fn sequential(t: f32) -> Color32 {
    let mixed = linear(LOW).mix(linear(HIGH), t.clamp(0.0, 1.0));
    let rgb: Srgb = Srgb::from_linear(mixed);
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Colour mapping: claim count → Color32
// ---------------------------------------------------------------------------

/// Maps a state's claim count onto the sequential scale, normalised to the
/// busiest state in the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    max_claims: usize,
}

impl ColorScale {
    pub fn for_claims(rows: &[StateSummary]) -> Self {
        let max_claims = rows.iter().map(|r| r.metrics.claims).max().unwrap_or(0);
        ColorScale { max_claims }
    }

    pub fn color_for(&self, claims: usize) -> Color32 {
        if self.max_claims == 0 {
            return sequential(0.0);
        }
        sequential(claims as f32 / self.max_claims as f32)
    }

    /// `n` evenly spaced (count, colour) stops for the legend.
    pub fn legend_stops(&self, n: usize) -> Vec<(usize, Color32)> {
        if n < 2 {
            return vec![(self.max_claims, self.color_for(self.max_claims))];
        }
        (0..n)
            .map(|i| {
                let claims = self.max_claims * i / (n - 1);
                (claims, self.color_for(claims))
            })
            .collect()
    }
}
