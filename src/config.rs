// ---------------------------------------------------------------------------
// Fixed column names, formats and UI defaults
// ---------------------------------------------------------------------------

/// Column holding the measurement timestamp.
pub const TIME_COLUMN: &str = "Time";

/// Column plotted on the X axis; also used verbatim as the X-axis label.
pub const SOURCE_PRESSURE_COLUMN: &str = "Source Pressure (mBar)";

/// Timestamp format inside the measurement files, e.g. `06/05/2024 09:37:57 AM`.
pub const FILE_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Format of the start/end fields of a time window, e.g. `2024-06-05 09:37:57`.
pub const WINDOW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Hint shown under the time-window grid.
pub const WINDOW_TIME_HINT: &str = "Datetime Format: YYYY-MM-DD HH:MM:SS";

/// File-name pattern appended to a bare directory.
pub const DEFAULT_FILE_GLOB: &str = "*.csv";

pub const APP_TITLE: &str = "Pressure Response Curves";

pub const WINDOW_SIZE: [f32; 2] = [1000.0, 700.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [640.0, 480.0];

/// Size of a freshly opened plot window.
pub const PLOT_WINDOW_SIZE: [f32; 2] = [720.0, 430.0];

/// Marker radius of scatter points, in points.
pub const MARKER_RADIUS: f32 = 3.0;
