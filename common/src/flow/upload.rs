//! Client-side file acceptance for the uploader.
//!
//! A file is accepted when its MIME type is one browsers report for CSV, or
//! when its name carries the `.csv` extension. Exactly one file is allowed.

use super::FlowError;

pub const ACCEPTED_MIME_TYPES: [&str; 2] = ["text/csv", "application/vnd.ms-excel"];
pub const ACCEPTED_EXTENSION: &str = ".csv";

/// Value for the `accept` attribute of the hidden file input.
pub const INPUT_ACCEPT: &str = ".csv,text/csv,application/vnd.ms-excel";

/// Name and MIME type of a candidate file, as reported by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo<'a> {
    pub name: &'a str,
    pub mime: &'a str,
}

impl<'a> FileInfo<'a> {
    pub fn new(name: &'a str, mime: &'a str) -> Self {
        Self { name, mime }
    }

    pub fn is_csv(&self) -> bool {
        let mime = self.mime.trim().to_ascii_lowercase();
        ACCEPTED_MIME_TYPES.contains(&mime.as_str())
            || self.name.to_ascii_lowercase().ends_with(ACCEPTED_EXTENSION)
    }
}

/// Checks a single file.
///
/// # Arguments
///
/// * `file` - name and MIME type reported by the browser
///
/// # Returns
///
/// `Ok(())` when the MIME type is a CSV type or the name ends in `.csv`
/// (case-insensitive), otherwise [`FlowError::RejectedFileType`].
pub fn check_file(file: FileInfo<'_>) -> Result<(), FlowError> {
    if file.is_csv() {
        Ok(())
    } else {
        Err(FlowError::RejectedFileType {
            name: file.name.to_string(),
        })
    }
}

/// Checks a whole drop/picker selection and returns the accepted file.
///
/// # Arguments
///
/// * `files` - every file in the selection, in browser order
///
/// # Returns
///
/// The single file when it is a CSV. An empty selection gives
/// [`FlowError::NoFile`], more than one file gives
/// [`FlowError::TooManyFiles`], and a non-CSV file gives
/// [`FlowError::RejectedFileType`].
pub fn check_selection<'a>(files: &[FileInfo<'a>]) -> Result<FileInfo<'a>, FlowError> {
    match files {
        [] => Err(FlowError::NoFile),
        [file] => check_file(*file).map(|_| *file),
        _ => Err(FlowError::TooManyFiles { count: files.len() }),
    }
}

/// Whether a drag in progress should show the reject state.
///
/// Only MIME types are visible while dragging; an empty type means the
/// browser does not know yet and is not held against the item.
pub fn drag_is_rejected(mime_types: &[String]) -> bool {
    if mime_types.len() > 1 {
        return true;
    }
    mime_types.iter().any(|mime| {
        let mime = mime.trim().to_ascii_lowercase();
        !mime.is_empty() && !ACCEPTED_MIME_TYPES.contains(&mime.as_str())
    })
}
