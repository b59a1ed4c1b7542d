use crate::config::SOURCE_PRESSURE_COLUMN;
use crate::data::filter::filter_all;
use crate::data::model::Dataset;
use crate::data::window::TimeWindow;

// ---------------------------------------------------------------------------
// Scatter plot model (independent of any drawing backend)
// ---------------------------------------------------------------------------

/// One labelled trace: `[source_pressure, response]` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// Everything needed to draw one pressure/response figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub invert_y: bool,
    pub series: Vec<ScatterSeries>,
}

impl ScatterPlot {
    /// Filter `dataset` once per window and collect the finite points of `y_column`.
    pub fn from_windows(
        dataset: &Dataset,
        windows: &[TimeWindow],
        y_column: &str,
        title: &str,
        invert_y: bool,
    ) -> Self {
        let series = filter_all(dataset, windows)
            .into_iter()
            .map(|(window, subset)| ScatterSeries {
                label: window.label.clone(),
                points: subset
                    .rows
                    .iter()
                    .filter_map(|row| {
                        let y = row.value(y_column)?;
                        let x = row.source_pressure;
                        (x.is_finite() && y.is_finite()).then_some([x, y])
                    })
                    .collect(),
            })
            .collect();

        ScatterPlot {
            title: title.to_string(),
            x_label: SOURCE_PRESSURE_COLUMN.to_string(),
            y_label: y_column.to_string(),
            invert_y,
            series,
        }
    }

    /// Total number of points across all series.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Y sign applied to data before drawing; inversion is a display transform.
    pub fn y_sign(&self) -> f64 {
        if self.invert_y {
            -1.0
        } else {
            1.0
        }
    }

    /// Points of series `idx` in display coordinates.
    pub fn display_points(&self, idx: usize) -> Vec<[f64; 2]> {
        let sign = self.y_sign();
        self.series[idx]
            .points
            .iter()
            .map(|&[x, y]| [x, sign * y])
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Render contract
// ---------------------------------------------------------------------------

/// Receives finished plots. The UI implementation opens one plot window per call.
pub trait PlotSink {
    fn render(&mut self, plot: ScatterPlot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MeasurementRow;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 5)
            .unwrap()
            .and_hms_opt(9, m, 0)
            .unwrap()
    }

    fn dataset() -> Dataset {
        let rows = [(0, 1.0, 10.0), (1, 2.0, f64::NAN), (2, 3.0, 30.0), (3, 4.0, 40.0)]
            .into_iter()
            .map(|(m, p, flow)| MeasurementRow {
                timestamp: at(m),
                source_pressure: p,
                values: [("Flow".to_string(), flow)].into_iter().collect(),
            })
            .collect();
        Dataset {
            rows,
            columns: vec!["Flow".into()],
        }
    }

    fn window(a: u32, b: u32, label: &str) -> TimeWindow {
        TimeWindow {
            start: at(a),
            end: at(b),
            label: label.into(),
        }
    }

    #[test]
    fn one_series_per_window_with_labels() {
        let windows = vec![window(0, 1, "early"), window(2, 3, "late"), window(3, 0, "rev")];
        let plot = ScatterPlot::from_windows(&dataset(), &windows, "Flow", "Leak", false);

        assert_eq!(plot.title, "Leak");
        assert_eq!(plot.x_label, "Source Pressure (mBar)");
        assert_eq!(plot.y_label, "Flow");
        let labels: Vec<&str> = plot.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["early", "late", "rev"]);

        // NaN response dropped.
        assert_eq!(plot.series[0].points, vec![[1.0, 10.0]]);
        assert_eq!(plot.series[1].points, vec![[3.0, 30.0], [4.0, 40.0]]);
        assert!(plot.series[2].points.is_empty());
        assert_eq!(plot.point_count(), 3);
    }

    #[test]
    fn inversion_negates_display_points_only() {
        let plot = ScatterPlot::from_windows(&dataset(), &[window(2, 3, "w")], "Flow", "", true);
        assert_eq!(plot.series[0].points, vec![[3.0, 30.0], [4.0, 40.0]]);
        assert_eq!(plot.display_points(0), vec![[3.0, -30.0], [4.0, -40.0]]);
    }
}
