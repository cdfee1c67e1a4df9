//! The bulk import state machine.
//!
//! ```text
//! Idle -> Uploading -> Previewing -> Importing -> Done
//!   ^         |            |  ^          |
//!   +--fail---+            |  +---fail---+
//!   +-------cancel---------+
//! ```
//!
//! Network calls happen outside: the component calls `begin_*`, runs the
//! request on the event loop, then hands the result to `finish_*`. Because the
//! flow only moves forward from the phase each step expects, a second upload or
//! commit cannot start while one is in flight.

use std::fmt;

use log::{debug, info, warn};
use thiserror::Error;

use crate::api::ApiError;
use crate::model::entity::{ImportEntity, RowKind};
use crate::model::preview::PreviewRow;
use crate::model::responses::{ConfirmPayload, ConfirmResponse, UploadResponse};
use crate::model::row_error::RowError;

pub mod drop_target;
pub mod notice;
pub mod table;
pub mod upload;

use upload::FileInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    Uploading,
    Previewing,
    Importing,
    Done,
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowPhase::Idle => "idle",
            FlowPhase::Uploading => "uploading",
            FlowPhase::Previewing => "previewing",
            FlowPhase::Importing => "importing",
            FlowPhase::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{name} is not a CSV file")]
    RejectedFileType { name: String },
    #[error("only one file can be uploaded at a time ({count} selected)")]
    TooManyFiles { count: usize },
    #[error("no file selected")]
    NoFile,
    #[error("upload failed: {0}")]
    UploadFailed(ApiError),
    #[error("import failed: {0}")]
    CommitFailed(ApiError),
    #[error("nothing to import")]
    NothingToImport,
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: FlowPhase,
    },
}

/// Rows and errors from the latest successful upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    kind: RowKind,
    rows: Vec<PreviewRow>,
    errors: Vec<RowError>,
}

impl Preview {
    pub fn new(kind: RowKind, rows: Vec<PreviewRow>, errors: Vec<RowError>) -> Self {
        Self { kind, rows, errors }
    }

    pub fn kind(&self) -> RowKind {
        self.kind
    }

    pub fn rows(&self) -> &[PreviewRow] {
        &self.rows
    }

    pub fn errors(&self) -> &[RowError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of a successful upload call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Every row passed validation.
    Clean { rows: usize },
    /// The server reported row errors; the preview is shown anyway.
    NeedsAttention { rows: usize, errors: usize },
    /// The file held no data rows and no errors; the flow went back to idle.
    Empty,
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportResult {
    pub imported: u64,
}

/// One instance of the upload → preview → confirm flow.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportFlow {
    entity: ImportEntity,
    phase: FlowPhase,
    preview: Option<Preview>,
}

impl ImportFlow {
    pub fn new(entity: ImportEntity) -> Self {
        Self {
            entity,
            phase: FlowPhase::Idle,
            preview: None,
        }
    }

    pub fn entity(&self) -> ImportEntity {
        self.entity
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// True while a request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, FlowPhase::Uploading | FlowPhase::Importing)
    }

    fn expect_phase(&self, expected: FlowPhase, action: &'static str) -> Result<(), FlowError> {
        if self.phase == expected {
            Ok(())
        } else {
            warn!("{} import: rejected {} while {}", self.entity.plural(), action, self.phase);
            Err(FlowError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }

    /// Accepts `file` for upload. On success the caller must send it and pass
    /// the response to [`ImportFlow::finish_upload`].
    pub fn begin_upload(&mut self, file: FileInfo<'_>) -> Result<(), FlowError> {
        self.expect_phase(FlowPhase::Idle, "upload")?;
        if let Err(err) = upload::check_file(file) {
            debug!("{} import: {}", self.entity.plural(), err);
            return Err(err);
        }
        self.preview = None;
        self.phase = FlowPhase::Uploading;
        debug!("{} import: uploading {}", self.entity.plural(), file.name);
        Ok(())
    }

    pub fn finish_upload(
        &mut self,
        result: Result<UploadResponse, ApiError>,
    ) -> Result<UploadOutcome, FlowError> {
        self.expect_phase(FlowPhase::Uploading, "finish upload")?;
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!("{} import: upload failed: {}", self.entity.plural(), err);
                self.phase = FlowPhase::Idle;
                return Err(FlowError::UploadFailed(err));
            }
        };

        if response.preview.is_empty() && response.errors.is_empty() {
            info!("{} import: upload returned no rows", self.entity.plural());
            self.phase = FlowPhase::Idle;
            return Ok(UploadOutcome::Empty);
        }

        let rows = response.preview.len();
        let errors = response.errors.len();
        self.preview = Some(Preview::new(
            self.entity.row_kind(),
            response.preview,
            response.errors,
        ));
        self.phase = FlowPhase::Previewing;
        info!(
            "{} import: previewing {} rows with {} errors",
            self.entity.plural(),
            rows,
            errors
        );

        Ok(if errors == 0 {
            UploadOutcome::Clean { rows }
        } else {
            UploadOutcome::NeedsAttention { rows, errors }
        })
    }

    /// Drops the preview and returns to the uploader.
    pub fn cancel(&mut self) -> Result<(), FlowError> {
        self.expect_phase(FlowPhase::Previewing, "cancel")?;
        self.preview = None;
        self.phase = FlowPhase::Idle;
        debug!("{} import: preview discarded", self.entity.plural());
        Ok(())
    }

    /// Builds the confirm body from every previewed row, including rows the
    /// server flagged. The preview is kept until the commit resolves.
    ///
    /// A preview that only carries errors has nothing to send and stays put.
    pub fn begin_confirm(&mut self) -> Result<ConfirmPayload, FlowError> {
        self.expect_phase(FlowPhase::Previewing, "confirm")?;
        let Some(preview) = self.preview.as_ref() else {
            return Err(FlowError::InvalidTransition {
                action: "confirm",
                phase: self.phase,
            });
        };
        if preview.rows.is_empty() {
            debug!("{} import: refusing to confirm an empty preview", self.entity.plural());
            return Err(FlowError::NothingToImport);
        }
        let policy = self.entity.field_policy();
        let rows = preview.rows.iter().map(|row| row.shaped(policy)).collect();
        self.phase = FlowPhase::Importing;
        debug!(
            "{} import: confirming {} rows ({} flagged errors)",
            self.entity.plural(),
            preview.rows.len(),
            preview.errors.len()
        );
        Ok(ConfirmPayload {
            entity: self.entity,
            rows,
        })
    }

    pub fn finish_confirm(
        &mut self,
        result: Result<ConfirmResponse, ApiError>,
    ) -> Result<ImportResult, FlowError> {
        self.expect_phase(FlowPhase::Importing, "finish confirm")?;
        match result {
            Ok(response) => {
                self.preview = None;
                self.phase = FlowPhase::Done;
                info!("{} import: {} records created", self.entity.plural(), response.imported);
                Ok(ImportResult {
                    imported: response.imported,
                })
            }
            Err(err) => {
                warn!("{} import: commit failed: {}", self.entity.plural(), err);
                self.phase = FlowPhase::Previewing;
                Err(FlowError::CommitFailed(err))
            }
        }
    }
}
