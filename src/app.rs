use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PressureCurvesApp {
    pub state: AppState,
}

impl eframe::App for PressureCurvesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Bottom panel: status line ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.state);
        });

        // ---- Central panel: the form ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::source_section(ui, &mut self.state);
                    ui.separator();
                    panels::window_section(ui, &mut self.state);
                    ui.separator();
                    panels::y_axis_section(ui, &mut self.state);
                    ui.separator();
                    panels::action_section(ui, &mut self.state);
                });
        });

        // ---- Floating figures ----
        plot::plot_windows(ctx, &mut self.state.plots);

        // ---- Error box on top of everything ----
        panels::notice_modal(ctx, &mut self.state);
    }
}
