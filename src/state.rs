use std::path::Path;

use crate::actions::{self, PlotError, PlotRequest};
use crate::chart::{PlotSink, ScatterPlot};
use crate::data::loader::discover_y_columns;
use crate::data::window::WindowList;

// ---------------------------------------------------------------------------
// Plot windows
// ---------------------------------------------------------------------------

/// A plot opened by the Plot button; stays until the user closes it.
pub struct PlotWindow {
    pub id: u64,
    pub plot: ScatterPlot,
    pub open: bool,
}

/// All figures opened so far.
#[derive(Default)]
pub struct PlotWindows {
    pub windows: Vec<PlotWindow>,
    next_id: u64,
}

impl PlotSink for PlotWindows {
    fn render(&mut self, plot: ScatterPlot) {
        self.next_id += 1;
        self.windows.push(PlotWindow {
            id: self.next_id,
            plot,
            open: true,
        });
    }
}

impl PlotWindows {
    /// Forget windows the user closed.
    pub fn retain_open(&mut self) {
        self.windows.retain(|w| w.open);
    }
}

// ---------------------------------------------------------------------------
// Blocking notification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Directory or glob pattern of the measurement files.
    pub pattern: String,

    pub title: String,

    pub windows: WindowList,

    /// Response columns offered in the Y-axis selector.
    pub y_columns: Vec<String>,

    pub y_column: Option<String>,

    pub invert_y: bool,

    pub plots: PlotWindows,

    /// Error waiting to be acknowledged; the form is blocked while set.
    pub notice: Option<Notice>,

    /// Status message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            title: String::new(),
            windows: WindowList::new(),
            y_columns: Vec::new(),
            y_column: None,
            invert_y: false,
            plots: PlotWindows::default(),
            notice: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Snapshot the form for a handler.
    pub fn request(&self) -> PlotRequest {
        PlotRequest {
            pattern: self.pattern.clone(),
            title: self.title.clone(),
            windows: self.windows.rows().to_vec(),
            y_column: self.y_column.clone(),
            invert_y: self.invert_y,
        }
    }

    /// Plot button.
    pub fn plot(&mut self) {
        let request = self.request();
        match actions::plot(&request, &mut self.plots) {
            Ok(points) => {
                self.status_message = Some(format!("Plotted {points} point(s)"));
            }
            Err(e) => self.report_plot_error(&e),
        }
    }

    fn report_plot_error(&mut self, err: &PlotError) {
        match err {
            PlotError::Datetime(e) => log::warn!(
                "Plot aborted, window row {} {} time '{}' is not YYYY-MM-DD HH:MM:SS",
                e.row + 1,
                e.field,
                e.value
            ),
            PlotError::FileLoad(e) if e.is_format_error() => {
                log::warn!("Plot aborted, malformed input data: {e}")
            }
            _ => log::warn!("Plot aborted: {err}"),
        }
        self.notice = Some(Notice {
            title: err.title().to_string(),
            message: err.to_string(),
        });
    }

    /// Export Timestamps button, after the user picked `path`.
    pub fn export(&mut self, path: &Path) {
        match actions::export(path, &self.request()) {
            Ok(()) => {
                self.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.notice = Some(Notice {
                    title: "Export Error".into(),
                    message: format!("{e:#}"),
                });
            }
        }
    }

    /// Browse button, after the user picked `dir`.
    pub fn set_directory(&mut self, dir: &Path) {
        let (pattern, columns) = actions::browse_directory(dir);
        self.pattern = pattern;
        self.set_y_columns(columns);
    }

    /// Refresh the Y-axis choices from whatever is typed in the pattern field.
    pub fn refresh_y_columns(&mut self) {
        let columns = discover_y_columns(&self.pattern);
        self.set_y_columns(columns);
    }

    /// Replace the Y choices; keeps the selection if it is still offered.
    /// An empty list leaves the choices untouched.
    fn set_y_columns(&mut self, columns: Vec<String>) {
        if columns.is_empty() {
            return;
        }
        if !self
            .y_column
            .as_ref()
            .is_some_and(|c| columns.contains(c))
        {
            self.y_column = None;
        }
        self.y_columns = columns;
    }

    pub fn add_window(&mut self) {
        self.windows.push_row();
    }

    pub fn remove_window(&mut self) {
        self.windows.pop_row();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
