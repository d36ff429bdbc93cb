use eframe::egui::Ui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use psn_chem_filter::data::CellValue;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Composition chart (bottom panel)
// ---------------------------------------------------------------------------

/// One x slot per range element: the range band as a vertical line, the
/// matched PSN values as points.
pub fn composition_plot(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        return;
    };

    Plot::new("composition_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Element")
        .y_axis_label("Composition")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (slot, entry) in report.ranges.iter().enumerate() {
                let x = slot as f64;
                let color = state.element_colors.color_for(&entry.element);

                let values: Vec<f64> = report
                    .result
                    .rows
                    .iter()
                    .filter_map(|row| row.values.get(&entry.element))
                    .filter(|cell| !cell.is_blank())
                    .filter_map(CellValue::as_number)
                    .collect();

                // Open sides are drawn up to the observed extremes.
                let lo = entry
                    .min
                    .or_else(|| values.iter().cloned().reduce(f64::min));
                let hi = entry
                    .max
                    .or_else(|| values.iter().cloned().reduce(f64::max));
                if let (Some(lo), Some(hi)) = (lo, hi) {
                    let band = Line::new(PlotPoints::new(vec![[x, lo], [x, hi]]))
                        .color(color.gamma_multiply(0.5))
                        .width(6.0);
                    plot_ui.line(band);
                }

                let points: PlotPoints = values.iter().map(|&v| [x, v]).collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&entry.element)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}
