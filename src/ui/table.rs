use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Matching PSN table (central panel)
// ---------------------------------------------------------------------------

/// Render the filtered result as `PSN_NO`, `PSN_Grade`, then one column per element.
pub fn result_table(ui: &mut Ui, state: &AppState) {
    let report = match &state.report {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a workbook to filter PSNs  (File → Open…)");
            });
            return;
        }
    };

    if report.result.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(report.summary());
        });
        return;
    }

    let columns = report.display_columns();
    let rows = report.display_rows();
    let n_elements = columns.len().saturating_sub(2);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(80.0))
        .columns(Column::auto().at_least(60.0), n_elements)
        .header(20.0, |mut header| {
            for (i, name) in columns.iter().enumerate() {
                header.col(|ui| {
                    let text = RichText::new(name).strong();
                    if i < 2 {
                        ui.label(text);
                    } else {
                        ui.label(text.color(state.element_colors.color_for(name)));
                    }
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let cells = &rows[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
