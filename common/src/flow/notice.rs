use crate::model::entity::ImportEntity;

use super::{FlowError, ImportResult, UploadOutcome};

/// How long a toast stays on screen.
pub const TOAST_MILLIS: u32 = 3000;

/// Visual variant of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

/// A user-facing message produced by a flow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: ToastKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

impl UploadOutcome {
    pub fn notice(&self, entity: ImportEntity) -> Notice {
        match self {
            UploadOutcome::Clean { rows } => Notice::success(format!(
                "CSV uploaded successfully! {} {} ready to import.",
                rows,
                entity.plural()
            )),
            UploadOutcome::NeedsAttention { errors, .. } => {
                Notice::warning(format!("{} rows have validation errors", errors))
            }
            UploadOutcome::Empty => Notice::warning(format!(
                "The CSV file contains no {} to import.",
                entity.plural()
            )),
        }
    }
}

/// Where to go once an import has been committed, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub route: &'static str,
    /// Leaving the page removes every toast, so the success toast gets its
    /// full time on screen first.
    pub delay_millis: u32,
}

impl ImportResult {
    pub fn notice(&self, entity: ImportEntity) -> Notice {
        Notice::success(format!(
            "Successfully imported {} {}!",
            self.imported,
            entity.plural()
        ))
    }

    pub fn redirect(&self, entity: ImportEntity) -> Redirect {
        Redirect {
            route: entity.listing_route(),
            delay_millis: TOAST_MILLIS,
        }
    }
}

impl FlowError {
    /// Toast shown for this error.
    pub fn notice(&self, entity: ImportEntity) -> Notice {
        let message = match self {
            FlowError::RejectedFileType { .. } => {
                "Invalid file type! Only CSV files are accepted".to_string()
            }
            FlowError::TooManyFiles { .. } => "Only one CSV file can be uploaded at a time".to_string(),
            FlowError::NoFile => "No file selected".to_string(),
            FlowError::NothingToImport => format!(
                "The CSV file contains no {} to import.",
                entity.plural()
            ),
            FlowError::UploadFailed(err) => err
                .server_message()
                .unwrap_or("Failed to upload CSV file")
                .to_string(),
            FlowError::CommitFailed(err) => err
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Failed to import {}", entity.plural())),
            FlowError::InvalidTransition { .. } => self.to_string(),
        };
        Notice::error(message)
    }
}
