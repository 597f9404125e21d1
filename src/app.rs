use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SeaIceApp {
    pub state: AppState,
}

impl SeaIceApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SeaIceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Arrow keys step through the charts.
        let (forward, back) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::ArrowLeft),
            )
        });
        if forward {
            self.state.view = self.state.view.next();
        }
        if back {
            self.state.view = self.state.view.prev();
        }

        // ---- Top panel: menu bar and chart tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: settings and statistics ----
        egui::SidePanel::left("summary_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::diagnostic_plot(ui, &self.state);
        });
    }
}
