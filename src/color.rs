use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use psn_chem_filter::data::RangeSet;

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
// Element → Color32
// ---------------------------------------------------------------------------

/// One colour per range element, shared by the table header and the chart.
#[derive(Debug, Clone, Default)]
pub struct ElementColors {
    mapping: BTreeMap<String, Color32>,
}

impl ElementColors {
    pub fn new(ranges: &RangeSet) -> Self {
        let palette = generate_palette(ranges.len());
        let mapping = ranges
            .elements()
            .zip(palette)
            .map(|(e, c)| (e.to_string(), c))
            .collect();
        ElementColors { mapping }
    }

    pub fn color_for(&self, element: &str) -> Color32 {
        self.mapping.get(element).copied().unwrap_or(Color32::GRAY)
    }
}
