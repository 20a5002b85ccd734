use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::SiteSelection;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (booster categories, pie slice labels) to distinct colours.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map, assigning palette entries in iteration order.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let palette = generate_palette(labels.len());
        ColorMap {
            mapping: labels.into_iter().zip(palette).collect(),
        }
    }

    /// Look up the colour for a label; unknown labels are grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}

/// Fixed colours for the per-site pie so "Success" / "Failure" read at a glance.
pub fn outcome_color(label: &str) -> Option<Color32> {
    match label {
        "Success" => Some(Color32::from_rgb(46, 160, 67)),
        "Failure" => Some(Color32::from_rgb(215, 58, 73)),
        _ => None,
    }
}

/// Pie slice colour. Slices are sites in the all-sites view and outcomes
/// for a single site, so the selection decides which mapping applies.
pub fn slice_color(selection: &SiteSelection, label: &str, site_colors: &ColorMap) -> Color32 {
    match selection {
        SiteSelection::All => site_colors.color_for(label),
        SiteSelection::Site(_) => outcome_color(label).unwrap_or_else(|| site_colors.color_for(label)),
    }
}
