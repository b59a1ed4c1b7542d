use eframe::egui::{self, Ui};
use egui_plot::{GridMark, Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::chart::ScatterPlot;
use crate::color::generate_palette;
use crate::config::{MARKER_RADIUS, PLOT_WINDOW_SIZE};
use crate::state::PlotWindows;

// ---------------------------------------------------------------------------
// Plot windows (one per Plot click)
// ---------------------------------------------------------------------------

/// Show every open figure as a floating window.
pub fn plot_windows(ctx: &egui::Context, plots: &mut PlotWindows) {
    for window in &mut plots.windows {
        let caption = if window.plot.title.is_empty() {
            format!("Figure {}", window.id)
        } else {
            format!("Figure {}: {}", window.id, window.plot.title)
        };
        egui::Window::new(caption)
            .id(egui::Id::new(("figure", window.id)))
            .open(&mut window.open)
            .default_size(PLOT_WINDOW_SIZE)
            .resizable(true)
            .show(ctx, |ui: &mut Ui| scatter_plot(ui, window.id, &window.plot));
    }
    plots.retain_open();
}

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

/// Draw one pressure/response figure.
pub fn scatter_plot(ui: &mut Ui, id: u64, chart: &ScatterPlot) {
    if !chart.title.is_empty() {
        ui.vertical_centered(|ui: &mut Ui| ui.heading(&chart.title));
    }

    let sign = chart.y_sign();
    let y_label = chart.y_label.clone();
    let x_label = chart.x_label.clone();

    let plot = Plot::new(("scatter", id))
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .y_axis_formatter(move |mark: GridMark, _range| {
            format_tick(data_value(sign, mark.value), mark.step_size)
        })
        .label_formatter(move |name: &str, point: &PlotPoint| {
            let y = data_value(sign, point.y);
            if name.is_empty() {
                format!("{x_label}: {:.4}\n{y_label}: {y:.4}", point.x)
            } else {
                format!("{name}\n{x_label}: {:.4}\n{y_label}: {y:.4}", point.x)
            }
        });

    let colors = generate_palette(chart.series.len());
    plot.show(ui, |plot_ui| {
        for (idx, series) in chart.series.iter().enumerate() {
            let points = Points::new(PlotPoints::from(chart.display_points(idx)))
                .name(&series.label)
                .color(colors[idx])
                .shape(MarkerShape::Circle)
                .filled(true)
                .radius(MARKER_RADIUS);
            plot_ui.points(points);
        }
    });
}

/// Map a displayed Y coordinate back to the data value.
fn data_value(sign: f64, display: f64) -> f64 {
    // + 0.0 turns -0.0 into 0.0
    sign * display + 0.0
}

/// Tick label with as many decimals as the grid step needs.
fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    format!("{:.*}", decimals.min(6), value)
}
