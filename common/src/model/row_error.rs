use serde::{Deserialize, Serialize};

/// Offset between a zero-based preview index and the spreadsheet row number
/// the server reports: one for the header line, one for 1-based numbering.
pub const HEADER_ROW_OFFSET: usize = 2;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
}

/// Validation failures the server attached to one spreadsheet row.
///
/// Several `RowError`s may point at the same row, typically one per failing
/// field. A row without any is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl RowError {
    /// Index in the preview list this error annotates, or `None` when the
    /// reported row points at the header or before it.
    pub fn display_index(&self) -> Option<usize> {
        self.row.checked_sub(HEADER_ROW_OFFSET)
    }

    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

/// Spreadsheet row number for a zero-based preview index.
pub fn spreadsheet_row(display_index: usize) -> usize {
    display_index + HEADER_ROW_OFFSET
}
