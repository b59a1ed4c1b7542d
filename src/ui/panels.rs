use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::WINDOW_TIME_HINT;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Form: data location and title
// ---------------------------------------------------------------------------

/// File entry, Browse button and plot title.
pub fn source_section(ui: &mut Ui, state: &mut AppState) {
    egui::Grid::new("source_grid")
        .num_columns(3)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Enter file directory:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.pattern)
                    .desired_width(380.0)
                    .hint_text("/path/to/data/*.csv"),
            );
            if response.lost_focus() && !state.pattern.is_empty() {
                state.refresh_y_columns();
            }
            if ui.button("Browse").clicked() {
                browse_dialog(state);
            }
            ui.end_row();

            ui.label("Plot Title:");
            ui.add(egui::TextEdit::singleline(&mut state.title).desired_width(380.0));
            ui.end_row();
        });
}

// ---------------------------------------------------------------------------
// Time window grid
// ---------------------------------------------------------------------------

/// One row per time window: start, end, legend label.
pub fn window_section(ui: &mut Ui, state: &mut AppState) {
    egui::Grid::new("window_grid")
        .num_columns(3)
        .striped(true)
        .spacing([10.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Start Datetime");
            ui.strong("End Datetime");
            ui.strong("Legend Label");
            ui.end_row();

            for row in state.windows.rows_mut() {
                ui.add(egui::TextEdit::singleline(&mut row.start).desired_width(160.0));
                ui.add(egui::TextEdit::singleline(&mut row.end).desired_width(160.0));
                ui.add(egui::TextEdit::singleline(&mut row.label).desired_width(160.0));
                ui.end_row();
            }
        });

    ui.label(RichText::new(WINDOW_TIME_HINT).weak());
}

// ---------------------------------------------------------------------------
// Y-axis selection and actions
// ---------------------------------------------------------------------------

pub fn y_axis_section(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Y-Axis Variable:");
        let selected = state.y_column.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("y_column")
            .width(240.0)
            .selected_text(selected)
            .show_ui(ui, |ui: &mut Ui| {
                for col in &state.y_columns {
                    ui.selectable_value(&mut state.y_column, Some(col.clone()), col);
                }
            });
        ui.checkbox(&mut state.invert_y, "Invert Y-Axis");
    });
}

pub fn action_section(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Add Time Window").clicked() {
            state.add_window();
        }
        if ui.button("Remove Time Window").clicked() {
            state.remove_window();
        }
    });

    ui.add_space(6.0);
    ui.vertical_centered(|ui: &mut Ui| {
        if ui.button("Plot").clicked() {
            state.plot();
        }
        if ui.button("Export Timestamps").clicked() {
            export_dialog(state);
        }
    });
}

/// Status line at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} time window(s), {} plot(s) open",
            state.windows.len(),
            state.plots.windows.len()
        ));
        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::GRAY));
        }
    });
}

// ---------------------------------------------------------------------------
// Error notification
// ---------------------------------------------------------------------------

/// Modal error box; blocks the form until acknowledged.
pub fn notice_modal(ctx: &egui::Context, state: &mut AppState) {
    let Some(notice) = state.notice.clone() else {
        return;
    };
    let response = egui::Modal::new(egui::Id::new("notice")).show(ctx, |ui: &mut Ui| {
        ui.set_max_width(420.0);
        ui.heading(&notice.title);
        ui.add_space(4.0);
        ui.label(RichText::new(&notice.message).color(Color32::RED));
        ui.add_space(8.0);
        ui.vertical_centered(|ui: &mut Ui| ui.button("OK").clicked()).inner
    });
    if response.inner || response.should_close() {
        state.dismiss_notice();
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn browse_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Select data directory")
        .pick_folder();

    if let Some(dir) = dir {
        state.set_directory(&dir);
        log::info!(
            "Selected {} ({} Y column(s))",
            state.pattern,
            state.y_columns.len()
        );
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export time windows")
        .add_filter("Text", &["txt"])
        .set_file_name("time_windows.txt")
        .save_file();

    if let Some(path) = file {
        state.export(&path);
    }
}
