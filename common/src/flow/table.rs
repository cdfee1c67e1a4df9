//! View model behind the preview table.
//!
//! [`PreviewTable::build`] turns a [`Preview`] into display-ready text: the
//! column headers, one line of cells per parsed row, and a status per row
//! derived from the server's [`RowError`]s. The server numbers rows as the
//! spreadsheet does (header on row 1, first data row on row 2), so an error
//! for row `n` annotates preview index `n - 2`.

use std::collections::BTreeMap;

use crate::model::entity::{ImportEntity, RowKind};
use crate::model::row_error::RowError;

use super::Preview;

/// Column injected in front of course previews that lack one.
pub const PROGRAM_COLUMN: &str = "program";

pub const VALID_MARKER: &str = "✓ Valid";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Valid,
    /// First message of every error reported for the row, in server order.
    Invalid(Vec<String>),
}

impl RowStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, RowStatus::Valid)
    }
}

/// One rendered line of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub index: usize,
    pub cells: Vec<String>,
    pub status: RowStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    /// Number of `RowError`s the server returned, placed or not.
    pub error_count: usize,
    /// Errors that point at no previewed row, as "Row N: message".
    pub unplaced: Vec<String>,
}

/// Columns to display for `preview`.
///
/// # Arguments
///
/// * `preview` - the parsed rows and their row kind
///
/// # Returns
///
/// The keys of the first row, in the order the server sent them, with
/// `program` prepended for course previews that do not carry it. An empty
/// preview has no columns.
pub fn display_columns(preview: &Preview) -> Vec<String> {
    let mut columns: Vec<String> = preview
        .rows()
        .first()
        .map(|row| row.columns().map(str::to_string).collect())
        .unwrap_or_default();
    if preview.kind() == RowKind::Course && !columns.iter().any(|c| c == PROGRAM_COLUMN) {
        columns.insert(0, PROGRAM_COLUMN.to_string());
    }
    columns
}

/// Groups errors by the preview index they annotate. Errors pointing outside
/// the preview come back separately.
fn errors_by_index(
    errors: &[RowError],
    row_count: usize,
) -> (BTreeMap<usize, Vec<&RowError>>, Vec<&RowError>) {
    let mut grouped: BTreeMap<usize, Vec<&RowError>> = BTreeMap::new();
    let mut unplaced = Vec::new();
    for error in errors {
        match error.display_index() {
            Some(index) if index < row_count => grouped.entry(index).or_default().push(error),
            _ => unplaced.push(error),
        }
    }
    (grouped, unplaced)
}

impl PreviewTable {
    /// Builds the table for `preview`.
    ///
    /// # Arguments
    ///
    /// * `preview` - rows and errors from the latest upload
    ///
    /// # Returns
    ///
    /// A table whose rows follow the preview order. A row is `Invalid` when at
    /// least one error points at it, listing the first message of each such
    /// error; otherwise it is `Valid`. Errors pointing at the header, or past
    /// the last row, flag nothing and are listed in `unplaced`.
    pub fn build(preview: &Preview) -> Self {
        let columns = display_columns(preview);
        let (mut grouped, unplaced) = errors_by_index(preview.errors(), preview.rows().len());
        let unplaced = unplaced
            .into_iter()
            .map(|e| match e.first_message() {
                Some(message) => format!("Row {}: {}", e.row, message),
                None => format!("Row {}: invalid", e.row),
            })
            .collect();

        let rows = preview
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let cells = columns.iter().map(|c| row.display_value(c)).collect();
                let status = match grouped.remove(&index) {
                    Some(errors) => RowStatus::Invalid(
                        errors
                            .iter()
                            .filter_map(|e| e.first_message())
                            .map(str::to_string)
                            .collect(),
                    ),
                    None => RowStatus::Valid,
                };
                TableRow {
                    index,
                    cells,
                    status,
                }
            })
            .collect();

        Self {
            columns,
            rows,
            error_count: preview.errors().len(),
            unplaced,
        }
    }

    /// Rows marked `Invalid`, counted once each however many errors they carry.
    pub fn flagged_rows(&self) -> usize {
        self.rows.iter().filter(|r| !r.status.is_valid()).count()
    }

    pub fn heading(&self, entity: ImportEntity) -> String {
        format!("Preview ({} {})", self.rows.len(), entity.plural())
    }

    /// There is at least one row to send.
    pub fn can_confirm(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn confirm_label(&self, entity: ImportEntity, importing: bool) -> String {
        if importing {
            "Importing...".to_string()
        } else {
            format!("Import {} {}", self.rows.len(), entity.plural_title())
        }
    }

    /// Banner shown under the table when the server reported errors.
    pub fn error_summary(&self) -> Option<String> {
        (self.error_count > 0)
            .then(|| format!("{} row(s) have validation errors", self.error_count))
    }
}
