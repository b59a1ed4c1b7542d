use chrono::NaiveDateTime;
use thiserror::Error;

use crate::config::WINDOW_TIME_FORMAT;

// ---------------------------------------------------------------------------
// TimeWindow – a parsed (start, end, label) interval
// ---------------------------------------------------------------------------

/// Closed interval used to select rows. `start > end` is legal and matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

impl TimeWindow {
    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        self.start <= *timestamp && *timestamp <= self.end
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which field of a window row failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowField {
    Start,
    End,
}

impl std::fmt::Display for WindowField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowField::Start => write!(f, "start"),
            WindowField::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Incorrect datetime format. Please use YYYY-MM-DD HH:MM:SS")]
pub struct DatetimeFormatError {
    /// Zero-based index of the offending row.
    pub row: usize,
    pub field: WindowField,
    pub value: String,
}

/// Parse a window boundary in `YYYY-MM-DD HH:MM:SS` form.
pub fn parse_window_time(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), WINDOW_TIME_FORMAT).ok()
}

// ---------------------------------------------------------------------------
// WindowRow – raw text as typed by the user
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowRow {
    pub start: String,
    pub end: String,
    pub label: String,
}

impl WindowRow {
    pub fn new(start: impl Into<String>, end: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            label: label.into(),
        }
    }

    /// Parse into a [`TimeWindow`]; `index` is only used for error reporting.
    pub fn parse(&self, index: usize) -> Result<TimeWindow, DatetimeFormatError> {
        let field_err = |field, value: &str| DatetimeFormatError {
            row: index,
            field,
            value: value.to_string(),
        };
        let start = parse_window_time(&self.start)
            .ok_or_else(|| field_err(WindowField::Start, &self.start))?;
        let end =
            parse_window_time(&self.end).ok_or_else(|| field_err(WindowField::End, &self.end))?;
        Ok(TimeWindow {
            start,
            end,
            label: self.label.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// WindowList – the growable list of rows in the form
// ---------------------------------------------------------------------------

/// Ordered window rows; grows and shrinks at the end only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowList {
    rows: Vec<WindowRow>,
}

impl Default for WindowList {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowList {
    /// A list with a single empty row.
    pub fn new() -> Self {
        Self {
            rows: vec![WindowRow::default()],
        }
    }

    pub fn from_rows(rows: Vec<WindowRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[WindowRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [WindowRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append an empty row.
    pub fn push_row(&mut self) {
        self.rows.push(WindowRow::default());
    }

    /// Remove the last row, if any.
    pub fn pop_row(&mut self) -> Option<WindowRow> {
        self.rows.pop()
    }

    /// Parse every row; the first bad row aborts the whole list.
    pub fn parse_all(&self) -> Result<Vec<TimeWindow>, DatetimeFormatError> {
        parse_rows(&self.rows)
    }
}

/// Parse a slice of rows, failing on the first invalid one.
pub fn parse_rows(rows: &[WindowRow]) -> Result<Vec<TimeWindow>, DatetimeFormatError> {
    rows.iter().enumerate().map(|(i, r)| r.parse(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_window_format() {
        let t = parse_window_time("2024-06-05 09:37:57").unwrap();
        assert_eq!(
            t,
            NaiveDate::from_ymd_opt(2024, 6, 5)
                .unwrap()
                .and_hms_opt(9, 37, 57)
                .unwrap()
        );
        assert!(parse_window_time("  2024-06-05 09:37:57 ").is_some());
    }

    #[test]
    fn rejects_file_style_format() {
        assert!(parse_window_time("06/05/2024 9:37:57 AM").is_none());
        assert!(parse_window_time("").is_none());
        assert!(parse_window_time("2024-06-05").is_none());
    }

    #[test]
    fn row_error_names_field_and_row() {
        let row = WindowRow::new("2024-06-05 09:00:00", "06/05/2024 9:37:57 AM", "bad");
        let err = row.parse(2).unwrap_err();
        assert_eq!(err.row, 2);
        assert_eq!(err.field, WindowField::End);
        assert_eq!(err.value, "06/05/2024 9:37:57 AM");
        assert_eq!(
            err.to_string(),
            "Incorrect datetime format. Please use YYYY-MM-DD HH:MM:SS"
        );
    }

    #[test]
    fn reversed_window_is_legal() {
        let w = WindowRow::new("2024-06-05 10:00:00", "2024-06-05 09:00:00", "rev")
            .parse(0)
            .unwrap();
        assert!(w.start > w.end);
        assert!(!w.contains(&w.start));
    }

    #[test]
    fn list_starts_with_one_empty_row() {
        let list = WindowList::new();
        assert_eq!(list.rows(), &[WindowRow::default()]);
    }

    #[test]
    fn push_and_pop_at_end() {
        let mut list = WindowList::new();
        list.rows_mut()[0].label = "first".into();
        list.push_row();
        list.rows_mut()[1].label = "second".into();
        assert_eq!(list.len(), 2);

        assert_eq!(list.pop_row().unwrap().label, "second");
        assert_eq!(list.pop_row().unwrap().label, "first");
        assert!(list.pop_row().is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn parse_all_fails_without_partial_result() {
        let list = WindowList::from_rows(vec![
            WindowRow::new("2024-06-05 09:00:00", "2024-06-05 10:00:00", "a"),
            WindowRow::new("nope", "2024-06-05 10:00:00", "b"),
        ]);
        let err = list.parse_all().unwrap_err();
        assert_eq!(err.row, 1);
        assert_eq!(err.field, WindowField::Start);

        let empty = WindowList::from_rows(Vec::new());
        assert_eq!(empty.parse_all().unwrap(), Vec::new());
    }
}
