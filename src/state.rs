use std::path::{Path, PathBuf};

use psn_chem_filter::data::{self, FilterError, FilterReport, MatchConfig};

use crate::color::ElementColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Workbook the current report was computed from.
    pub workbook_path: Option<PathBuf>,

    /// Sheet names and category used for each request.
    pub config: MatchConfig,

    /// Last successful request (None until a workbook is loaded, or after an error).
    pub report: Option<FilterReport>,

    /// One colour per range element.
    pub element_colors: ElementColors,

    /// Whether the composition chart is shown under the table.
    pub show_chart: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load a workbook and run the filter over it.
    pub fn open(&mut self, path: PathBuf) {
        let outcome = data::run_path(&path, &self.config);
        self.workbook_path = Some(path);
        match outcome {
            Ok(report) => self.set_report(report),
            Err(e) => self.set_error(e),
        }
    }

    /// Re-run the request on the current workbook (after editing the file).
    pub fn reload(&mut self) {
        if let Some(path) = self.workbook_path.clone() {
            self.open(path);
        }
    }

    pub fn set_report(&mut self, report: FilterReport) {
        self.element_colors = ElementColors::new(&report.ranges);
        self.status_message = None;
        self.report = Some(report);
    }

    /// Errors replace any previous result; nothing partial stays on screen.
    pub fn set_error(&mut self, err: FilterError) {
        log::error!("Filtering failed ({:?}): {err}", err.kind());
        self.report = None;
        self.status_message = Some(format!("Error: {err}"));
    }

    /// Export the displayed table as CSV.
    pub fn export_csv(&mut self, path: &Path) {
        let Some(report) = &self.report else {
            return;
        };
        let written = std::fs::File::create(path)
            .map_err(anyhow::Error::from)
            .and_then(|file| report.write_csv(file));
        match written {
            Ok(()) => {
                log::info!("Exported {} rows to {}", report.result.len(), path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
