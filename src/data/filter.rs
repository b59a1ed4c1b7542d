use super::model::Dataset;
use super::window::TimeWindow;

// ---------------------------------------------------------------------------
// Window filter: rows whose timestamp falls inside a closed interval
// ---------------------------------------------------------------------------

/// Return the rows with `window.start <= timestamp <= window.end`, in input order.
///
/// Column list is carried over unchanged, so the result can be filtered again.
pub fn filter(dataset: &Dataset, window: &TimeWindow) -> Dataset {
    Dataset {
        rows: dataset
            .rows
            .iter()
            .filter(|row| window.contains(&row.timestamp))
            .cloned()
            .collect(),
        columns: dataset.columns.clone(),
    }
}

/// Apply every window independently; a row may land in several outputs.
pub fn filter_all<'a>(
    dataset: &Dataset,
    windows: &'a [TimeWindow],
) -> Vec<(&'a TimeWindow, Dataset)> {
    windows
        .iter()
        .map(|w| {
            let subset = filter(dataset, w);
            log::debug!("window '{}': {} rows", w.label, subset.len());
            (w, subset)
        })
        .collect()
}
