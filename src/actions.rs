use std::path::Path;

use thiserror::Error;

use crate::chart::{PlotSink, ScatterPlot};
use crate::config::DEFAULT_FILE_GLOB;
use crate::data::export::export_to_path;
use crate::data::loader::{self, LoadError};
use crate::data::window::{parse_rows, DatetimeFormatError, WindowRow};

// ---------------------------------------------------------------------------
// Button handlers, independent of the UI toolkit
// ---------------------------------------------------------------------------

/// Snapshot of the form at the moment a button is pressed.
#[derive(Debug, Clone, Default)]
pub struct PlotRequest {
    pub pattern: String,
    pub title: String,
    pub windows: Vec<WindowRow>,
    pub y_column: Option<String>,
    pub invert_y: bool,
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("No Y-axis variable selected")]
    NoYColumn,

    #[error("Column '{0}' is not present in the loaded data")]
    UnknownYColumn(String),

    #[error(transparent)]
    Datetime(#[from] DatetimeFormatError),

    #[error("Failed to load files: {0}")]
    FileLoad(#[from] LoadError),
}

impl PlotError {
    /// Dialog title for the error notification.
    pub fn title(&self) -> &'static str {
        match self {
            PlotError::NoYColumn | PlotError::UnknownYColumn(_) => "Plot Error",
            PlotError::Datetime(_) => "Datetime Error",
            PlotError::FileLoad(_) => "File Error",
        }
    }
}

/// Validate, load, filter and hand one plot to `sink`.
///
/// Files are loaded before the window text is parsed, so when both are bad the
/// file error is the one reported. All checks run before the sink is touched,
/// so an error never produces a partial plot. Returns the number of points drawn.
pub fn plot(request: &PlotRequest, sink: &mut impl PlotSink) -> Result<usize, PlotError> {
    let y_column = request
        .y_column
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or(PlotError::NoYColumn)?;

    let dataset = loader::load(&request.pattern)?;
    let windows = parse_rows(&request.windows)?;
    if !dataset.has_column(y_column) {
        return Err(PlotError::UnknownYColumn(y_column.to_string()));
    }

    let chart = ScatterPlot::from_windows(
        &dataset,
        &windows,
        y_column,
        &request.title,
        request.invert_y,
    );
    let points = chart.point_count();
    log::info!(
        "Plotting '{y_column}' for {} window(s), {points} point(s)",
        windows.len()
    );
    sink.render(chart);
    Ok(points)
}

/// Write the current window definitions to `path`.
pub fn export(path: &Path, request: &PlotRequest) -> anyhow::Result<()> {
    export_to_path(path, &request.pattern, &request.title, &request.windows)
}

/// Pattern and Y-column choices for a directory picked in the file dialog.
pub fn browse_directory(dir: &Path) -> (String, Vec<String>) {
    let pattern = dir.join(DEFAULT_FILE_GLOB).to_string_lossy().into_owned();
    let columns = loader::discover_y_columns(&pattern);
    log::debug!("{} Y column(s) found in {}", columns.len(), dir.display());
    (pattern, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[derive(Default)]
    struct RecordingSink {
        plots: Vec<ScatterPlot>,
    }

    impl PlotSink for RecordingSink {
        fn render(&mut self, plot: ScatterPlot) {
            self.plots.push(plot);
        }
    }

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("run1.csv"),
            "Time,Source Pressure (mBar),Flow\n\
             06/05/2024 09:37:55 AM,1.0,10\n\
             06/05/2024 09:37:56 AM,2.0,20\n\
             06/05/2024 09:37:57 AM,3.0,30\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("run2.csv"),
            "Time,Source Pressure (mBar),Flow\n\
             06/05/2024 10:00:00 AM,4.0,40\n",
        )
        .unwrap();
        dir
    }

    fn request(dir: &Path, windows: Vec<WindowRow>) -> PlotRequest {
        PlotRequest {
            pattern: dir.join("*.csv").to_string_lossy().into_owned(),
            title: "Pump down".into(),
            windows,
            y_column: Some("Flow".into()),
            invert_y: true,
        }
    }

    #[test]
    fn plots_one_series_per_window() {
        let dir = fixture_dir();
        let req = request(
            dir.path(),
            vec![
                WindowRow::new("2024-06-05 09:37:56", "2024-06-05 09:37:57", "A"),
                WindowRow::new("2024-06-05 09:00:00", "2024-06-05 11:00:00", "all"),
            ],
        );
        let mut sink = RecordingSink::default();

        let points = plot(&req, &mut sink).unwrap();

        assert_eq!(points, 6);
        assert_eq!(sink.plots.len(), 1);
        let chart = &sink.plots[0];
        assert_eq!(chart.title, "Pump down");
        assert_eq!(chart.y_label, "Flow");
        assert!(chart.invert_y);
        assert_eq!(chart.series[0].points, vec![[2.0, 20.0], [3.0, 30.0]]);
        assert_eq!(chart.series[1].points.len(), 4);
    }

    #[test]
    fn bad_window_format_never_renders() {
        let dir = fixture_dir();
        let req = request(
            dir.path(),
            vec![
                WindowRow::new("2024-06-05 09:37:57", "2024-06-05 09:40:00", "ok"),
                WindowRow::new("06/05/2024 9:37:57 AM", "2024-06-05 09:40:00", "bad"),
            ],
        );
        let mut sink = RecordingSink::default();

        let err = plot(&req, &mut sink).unwrap_err();

        assert!(matches!(err, PlotError::Datetime(ref e) if e.row == 1));
        assert_eq!(err.title(), "Datetime Error");
        assert_eq!(
            err.to_string(),
            "Incorrect datetime format. Please use YYYY-MM-DD HH:MM:SS"
        );
        assert!(sink.plots.is_empty());
    }

    #[test]
    fn load_failure_never_renders() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(
            dir.path(),
            vec![WindowRow::new("2024-06-05 09:00:00", "2024-06-05 10:00:00", "w")],
        );
        let mut sink = RecordingSink::default();

        let err = plot(&req, &mut sink).unwrap_err();

        assert!(matches!(err, PlotError::FileLoad(LoadError::NoFilesMatched { .. })));
        assert_eq!(err.title(), "File Error");
        assert!(err.to_string().starts_with("Failed to load files: "));
        assert!(sink.plots.is_empty());
    }

    #[test]
    fn file_error_wins_over_bad_window() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(
            dir.path(),
            vec![WindowRow::new("06/05/2024 9:37:57 AM", "", "bad")],
        );
        let mut sink = RecordingSink::default();

        let err = plot(&req, &mut sink).unwrap_err();

        assert!(matches!(err, PlotError::FileLoad(_)));
        assert_eq!(err.title(), "File Error");
        assert!(sink.plots.is_empty());
    }

    #[test]
    fn missing_y_selection_is_guarded() {
        let dir = fixture_dir();
        let mut req = request(dir.path(), Vec::new());
        let mut sink = RecordingSink::default();

        req.y_column = None;
        assert!(matches!(plot(&req, &mut sink), Err(PlotError::NoYColumn)));
        req.y_column = Some(String::new());
        assert!(matches!(plot(&req, &mut sink), Err(PlotError::NoYColumn)));
        req.y_column = Some("Temperature".into());
        assert!(matches!(
            plot(&req, &mut sink),
            Err(PlotError::UnknownYColumn(ref c)) if c == "Temperature"
        ));
        assert!(sink.plots.is_empty());
    }

    #[test]
    fn zero_windows_plots_empty_figure() {
        let dir = fixture_dir();
        let req = request(dir.path(), Vec::new());
        let mut sink = RecordingSink::default();

        assert_eq!(plot(&req, &mut sink).unwrap(), 0);
        assert!(sink.plots[0].series.is_empty());
    }

    #[test]
    fn export_writes_request_windows() {
        let dir = tempfile::tempdir().unwrap();
        let req = PlotRequest {
            pattern: "/data/*.csv".into(),
            title: "T".into(),
            windows: vec![WindowRow::new("a", "b", "c")],
            ..Default::default()
        };
        let path = dir.path().join("out.txt");

        export(&path, &req).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Data File Location: /data/*.csv\n\nTitle: T\n\nStart Datetime\t\tEnd Datetime\t\tLabel\na\tb\tc\n"
        );
    }

    #[test]
    fn browse_builds_pattern_and_columns() {
        let dir = fixture_dir();
        let (pattern, columns) = browse_directory(dir.path());
        assert!(pattern.ends_with("*.csv"));
        assert_eq!(columns, vec!["Flow".to_string()]);
    }
}
