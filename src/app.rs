use std::path::PathBuf;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TuitionLensApp {
    pub state: AppState,
}

impl TuitionLensApp {
    /// Build the app, optionally preloading a dataset directory or config
    /// file given on the command line.
    pub fn new(preload: Option<PathBuf>) -> Self {
        let mut state = AppState::default();
        if let Some(path) = preload {
            state.load_path(&path);
        }
        Self { state }
    }
}

impl eframe::App for TuitionLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: chart selector ----
        egui::SidePanel::left("chart_selector")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: values behind the chart ----
        if self.state.show_values && self.state.report.is_some() {
            egui::TopBottomPanel::bottom("values_panel")
                .resizable(true)
                .default_height(180.0)
                .show(ctx, |ui| {
                    panels::values_panel(ui, &self.state);
                });
        }

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_panel(ui, &self.state);
        });
    }
}
