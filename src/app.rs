use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PsnFilterApp {
    pub state: AppState,
}

impl eframe::App for PsnFilterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: input ranges ----
        egui::SidePanel::left("range_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::range_panel(ui, &self.state);
            });

        // ---- Bottom panel: composition chart ----
        if self.state.show_chart && self.state.report.is_some() {
            egui::TopBottomPanel::bottom("chart_panel")
                .default_height(260.0)
                .resizable(true)
                .show(ctx, |ui| {
                    plot::composition_plot(ui, &self.state);
                });
        }

        // ---- Central panel: matching PSNs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::result_table(ui, &self.state);
        });
    }
}
