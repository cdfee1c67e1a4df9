//! State behind the drag-and-drop / click-to-browse zone.
//!
//! The zone tracks three things:
//!
//! * whether something is being dragged over it, and whether that drag
//!   looks acceptable;
//! * why the last drop or pick was refused, if it was;
//! * whether a click should open the file picker.
//!
//! Browsers fire `dragenter`/`dragleave` for every child element the pointer
//! crosses, so the zone counts enters against leaves and only goes back to
//! idle once the pointer has left the zone itself.

use super::upload::{check_selection, FileInfo};
use super::FlowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Active,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    drag: DragState,
    /// Enters minus leaves seen since the drag started.
    depth: u32,
    /// Why the last drop or pick was refused.
    rejection: Option<String>,
}

impl Default for DropTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl DropTarget {
    pub fn new() -> Self {
        Self {
            drag: DragState::Idle,
            depth: 0,
            rejection: None,
        }
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn rejection(&self) -> Option<&str> {
        self.rejection.as_deref()
    }

    fn show_drag(&mut self, rejected: bool) -> bool {
        let next = if rejected {
            DragState::Rejected
        } else {
            DragState::Active
        };
        let changed = self.drag != next || self.rejection.is_some();
        self.drag = next;
        self.rejection = None;
        changed
    }

    /// Pointer entered the zone or one of its children. Returns whether the
    /// zone needs a redraw.
    pub fn drag_enter(&mut self, rejected: bool, loading: bool) -> bool {
        if loading {
            return false;
        }
        self.depth += 1;
        self.show_drag(rejected)
    }

    /// `dragover` repeats while the pointer moves; it never changes the depth.
    pub fn drag_over(&mut self, rejected: bool, loading: bool) -> bool {
        if loading {
            return false;
        }
        self.show_drag(rejected)
    }

    /// Pointer left the zone or one of its children. The zone only goes idle
    /// when every enter has been matched by a leave.
    pub fn drag_leave(&mut self) -> bool {
        self.depth = self.depth.saturating_sub(1);
        if self.depth > 0 || self.drag == DragState::Idle {
            return false;
        }
        self.drag = DragState::Idle;
        true
    }

    /// Validates a dropped or picked selection.
    ///
    /// # Arguments
    ///
    /// * `files` - name and MIME type of every file in the selection
    /// * `loading` - an upload is in flight; the selection is ignored
    ///
    /// # Returns
    ///
    /// `true` when the selection is exactly one CSV file and should be handed
    /// to the parent. A refused selection is remembered and shown until the
    /// next drag or pick.
    pub fn drop_files(&mut self, files: &[FileInfo<'_>], loading: bool) -> bool {
        self.depth = 0;
        self.drag = DragState::Idle;
        if loading {
            return false;
        }
        match check_selection(files) {
            Ok(_) => {
                self.rejection = None;
                true
            }
            Err(FlowError::NoFile) => false,
            Err(err) => {
                log::warn!("drop zone: {}", err);
                self.rejection = Some(err.to_string());
                false
            }
        }
    }

    /// Whether a click on the zone should open the file picker.
    ///
    /// Opening the picker dispatches a click on the hidden input. That click
    /// bubbles back to the zone and must not open the picker again.
    pub fn opens_picker(&self, click_from_picker: bool, loading: bool) -> bool {
        !loading && !click_from_picker
    }

    pub fn is_rejecting(&self) -> bool {
        self.drag == DragState::Rejected || self.rejection.is_some()
    }

    /// BEM modifier for the zone's border.
    pub fn modifier(&self) -> &'static str {
        match (self.drag, self.is_rejecting()) {
            (_, true) => "drop-zone--reject",
            (DragState::Active, false) => "drop-zone--active",
            _ => "drop-zone--idle",
        }
    }

    pub fn headline(&self, loading: bool) -> &'static str {
        match (self.drag, self.is_rejecting()) {
            (_, true) => "Invalid file type!",
            (DragState::Active, false) => "Drop the CSV file here...",
            _ if loading => "Processing...",
            _ => "Drag & drop a CSV file here",
        }
    }

    /// The "or click to browse" line is only shown on an idle, clean zone.
    pub fn shows_browse_hint(&self) -> bool {
        self.drag == DragState::Idle && self.rejection.is_none()
    }
}
