mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::PsnFilterApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "PSN Chemistry Filter",
        options,
        Box::new(move |_cc| {
            let mut app = PsnFilterApp::default();
            if let Some(path) = initial {
                app.state.open(path);
            }
            Ok(Box::new(app))
        }),
    )
}
