use serde::{Deserialize, Serialize};

/// The kind of record a bulk CSV import creates.
///
/// Every entity shares the same two-step contract against the remote API
/// (`POST /upload/{entity}/csv` then `POST /upload/{entity}/confirm`) and only
/// differs in paths, wording and which fields are forwarded on confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportEntity {
    Students,
    Teachers,
    Courses,
}

/// Explicit tag stored next to a preview so the table renderer never has to
/// guess the row shape from the fields it happens to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Student,
    Teacher,
    Course,
}

/// Which preview fields are forwarded to the confirm endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Only the listed fields, in this order. Absent fields are omitted.
    AllowList(&'static [&'static str]),
    /// Rows are sent exactly as the upload endpoint returned them.
    PassThrough,
}

/// Fields the students confirm endpoint accepts.
pub const STUDENT_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "email",
    "password",
    "phone",
    "dateOfBirth",
    "gender",
    "address",
    "city",
    "state",
    "country",
    "postalCode",
    "parentName",
    "parentPhone",
    "parentEmail",
    "program",
    "courseCode",
    "courseName",
    "batchId",
    "semesterId",
    "sectionId",
    "courseId",
    "rollNumber",
    "batch",
    "section",
];

impl ImportEntity {
    pub const ALL: [ImportEntity; 3] = [
        ImportEntity::Students,
        ImportEntity::Teachers,
        ImportEntity::Courses,
    ];

    /// Path segment used by both API endpoints, also the payload key on confirm.
    pub fn path_segment(self) -> &'static str {
        match self {
            ImportEntity::Students => "students",
            ImportEntity::Teachers => "teachers",
            ImportEntity::Courses => "courses",
        }
    }

    pub fn upload_path(self) -> String {
        format!("/upload/{}/csv", self.path_segment())
    }

    pub fn confirm_path(self) -> String {
        format!("/upload/{}/confirm", self.path_segment())
    }

    pub fn payload_key(self) -> &'static str {
        self.path_segment()
    }

    pub fn row_kind(self) -> RowKind {
        match self {
            ImportEntity::Students => RowKind::Student,
            ImportEntity::Teachers => RowKind::Teacher,
            ImportEntity::Courses => RowKind::Course,
        }
    }

    pub fn field_policy(self) -> FieldPolicy {
        match self {
            ImportEntity::Students => FieldPolicy::AllowList(STUDENT_FIELDS),
            ImportEntity::Teachers | ImportEntity::Courses => FieldPolicy::PassThrough,
        }
    }

    /// Lower-case plural used in toasts ("3 students ready to import").
    pub fn plural(self) -> &'static str {
        self.path_segment()
    }

    /// Capitalised plural used on buttons ("Import 3 Students").
    pub fn plural_title(self) -> &'static str {
        match self {
            ImportEntity::Students => "Students",
            ImportEntity::Teachers => "Teachers",
            ImportEntity::Courses => "Courses",
        }
    }

    /// Listing page the user lands on after a successful import.
    pub fn listing_route(self) -> &'static str {
        match self {
            ImportEntity::Students => "/admin",
            ImportEntity::Teachers => "/admin/teachers",
            ImportEntity::Courses => "/admin/courses",
        }
    }

    /// Route of the bulk upload page for this entity.
    pub fn page_route(self) -> &'static str {
        match self {
            ImportEntity::Students => "/admin/bulk-upload",
            ImportEntity::Teachers => "/admin/bulk-upload-teachers",
            ImportEntity::Courses => "/admin/bulk-upload-courses",
        }
    }

    /// Resolves a browser pathname to the bulk upload page it belongs to.
    /// A single trailing slash is tolerated.
    pub fn from_page_route(path: &str) -> Option<Self> {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        Self::ALL.into_iter().find(|entity| entity.page_route() == path)
    }

    pub fn page_title(self) -> &'static str {
        match self {
            ImportEntity::Students => "Bulk CSV Upload",
            ImportEntity::Teachers => "Bulk Upload Teachers",
            ImportEntity::Courses => "Bulk Upload Courses",
        }
    }

    pub fn upload_heading(self) -> &'static str {
        match self {
            ImportEntity::Students => "Upload CSV File",
            ImportEntity::Teachers => "Upload Teacher CSV File",
            ImportEntity::Courses => "Upload Course CSV File",
        }
    }

    pub fn upload_hint(self) -> &'static str {
        match self {
            ImportEntity::Students => {
                "Drag and drop a CSV file containing student information. The file should include columns for: firstName, lastName, email, courseId, batchId, semesterId, etc."
            }
            ImportEntity::Teachers => {
                "Drag and drop a CSV file containing teacher information. The file should include columns for: firstName, lastName, email, password, programCode."
            }
            ImportEntity::Courses => {
                "Drag and drop a CSV file containing course information. The file should include columns for: program, code, name, etc."
            }
        }
    }
}
