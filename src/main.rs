mod app;
mod color;
mod config;
mod data;
mod metrics;
mod state;
mod ui;

use std::path::PathBuf;

use app::TuitionLensApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional argument: dataset directory or JSON config file to preload.
    let preload: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tuition Lens – Degree Cost & Payoff",
        options,
        Box::new(move |_cc| Ok(Box::new(TuitionLensApp::new(preload)))),
    )
}
