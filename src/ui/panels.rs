use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – input chemistry range
// ---------------------------------------------------------------------------

/// Render the Min/Max grid of the parsed range set.
pub fn range_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Input Chemistry Range");
    ui.separator();

    let Some(report) = &state.report else {
        ui.label("No workbook loaded.");
        return;
    };

    if report.ranges.is_empty() {
        ui.label("No elements named in the range sheet; every AIM row matches.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("range_grid")
                .striped(true)
                .num_columns(3)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("");
                    ui.strong("Min");
                    ui.strong("Max");
                    ui.end_row();

                    for [element, min, max] in report.ranges.table() {
                        let color = state.element_colors.color_for(&element);
                        ui.label(RichText::new(&element).color(color).strong());
                        ui.label(min);
                        ui.label(max);
                        ui.end_row();
                    }
                });

            let inverted = report.ranges.inverted();
            if !inverted.is_empty() {
                ui.add_space(6.0);
                for entry in inverted {
                    ui.label(
                        RichText::new(format!("{}: Min is above Max", entry.element))
                            .color(Color32::YELLOW),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open workbook…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.workbook_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(state.report.is_some(), egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(report) = &state.report {
            ui.label(format!(
                "{} PSNs, {} {}",
                report.catalog_rows, report.category_rows, state.config.category
            ));
            ui.separator();
            let color = if report.result.is_empty() {
                Color32::YELLOW
            } else {
                Color32::GREEN
            };
            ui.label(RichText::new(report.summary()).color(color));
            ui.separator();

            if ui.selectable_label(state.show_chart, "Chart").clicked() {
                state.show_chart = !state.show_chart;
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open PSN workbook")
        .add_filter("Supported workbooks", &["xlsx", "xlsm", "xls", "ods", "json"])
        .add_filter("Excel", &["xlsx", "xlsm", "xls"])
        .add_filter("JSON workbook", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open(path);
    }
}

/// A folder holding one file per sheet (`PSN_DATA.parquet`, `Dashboard.csv`, …).
pub fn open_folder_dialog(state: &mut AppState) {
    if let Some(dir) = rfd::FileDialog::new()
        .set_title("Open folder of sheets")
        .pick_folder()
    {
        state.open(dir);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let target = rfd::FileDialog::new()
        .set_title("Export matching PSNs")
        .add_filter("CSV", &["csv"])
        .set_file_name("matching_psns.csv")
        .save_file();

    if let Some(path) = target {
        state.export_csv(&path);
    }
}
