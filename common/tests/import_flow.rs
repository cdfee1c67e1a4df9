use std::cell::{Cell, RefCell};

use common::api::{ApiError, ImportApi};
use common::flow::notice::{Notice, ToastKind, TOAST_MILLIS};
use common::flow::table::{PreviewTable, RowStatus, VALID_MARKER};
use common::flow::upload::{check_selection, FileInfo};
use common::flow::{FlowError, FlowPhase, ImportFlow, ImportResult, UploadOutcome};
use common::model::entity::{ImportEntity, STUDENT_FIELDS};
use common::model::preview::PreviewRow;
use common::model::responses::{ConfirmPayload, ConfirmResponse, UploadResponse};
use serde_json::{json, Value};

/// In-memory API that replays canned responses and records what it was sent.
struct RecordingApi {
    upload_reply: RefCell<Option<Result<UploadResponse, ApiError>>>,
    confirm_reply: RefCell<Option<Result<ConfirmResponse, ApiError>>>,
    uploads: Cell<usize>,
    confirms: RefCell<Vec<Value>>,
}

impl RecordingApi {
    fn new() -> Self {
        Self {
            upload_reply: RefCell::new(None),
            confirm_reply: RefCell::new(None),
            uploads: Cell::new(0),
            confirms: RefCell::new(Vec::new()),
        }
    }

    fn replying_to_upload(self, reply: Value) -> Self {
        *self.upload_reply.borrow_mut() = Some(Ok(serde_json::from_value(reply).unwrap()));
        self
    }

    fn replying_to_confirm(self, reply: Result<ConfirmResponse, ApiError>) -> Self {
        *self.confirm_reply.borrow_mut() = Some(reply);
        self
    }

    fn network_calls(&self) -> usize {
        self.uploads.get() + self.confirms.borrow().len()
    }
}

impl ImportApi for RecordingApi {
    type Upload = String;

    async fn upload_csv(
        &self,
        _entity: ImportEntity,
        _file: &String,
    ) -> Result<UploadResponse, ApiError> {
        self.uploads.set(self.uploads.get() + 1);
        self.upload_reply
            .borrow()
            .clone()
            .unwrap_or(Err(ApiError::Network("no reply scripted".into())))
    }

    async fn confirm(&self, payload: &ConfirmPayload) -> Result<ConfirmResponse, ApiError> {
        self.confirms
            .borrow_mut()
            .push(serde_json::to_value(payload).unwrap());
        self.confirm_reply
            .borrow()
            .clone()
            .unwrap_or(Err(ApiError::Network("no reply scripted".into())))
    }
}

/// Drives the uploader the same way the bulk upload page does.
async fn upload(
    flow: &mut ImportFlow,
    api: &RecordingApi,
    name: &str,
    mime: &str,
) -> Result<UploadOutcome, FlowError> {
    let file = check_selection(&[FileInfo::new(name, mime)])?;
    flow.begin_upload(file)?;
    let result = api.upload_csv(flow.entity(), &name.to_string()).await;
    flow.finish_upload(result)
}

async fn confirm(flow: &mut ImportFlow, api: &RecordingApi) -> Result<ImportResult, FlowError> {
    let payload = flow.begin_confirm()?;
    let result = api.confirm(&payload).await;
    flow.finish_confirm(result)
}

fn three_students() -> Value {
    json!({
        "preview": [
            {"firstName": "Ada", "lastName": "Lovelace", "email": "ada@uni.edu", "rollNumber": "R1"},
            {"firstName": "Alan", "lastName": "Turing", "email": "alan@uni.edu", "rollNumber": "R2"},
            {"firstName": "Grace", "lastName": "Hopper", "email": "grace@uni.edu", "rollNumber": "R3"}
        ],
        "errors": []
    })
}

#[tokio::test]
async fn non_csv_files_never_reach_the_network() {
    for (name, mime) in [
        ("roster.xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        ("photo.png", "image/png"),
        ("notes.txt", "text/plain"),
        ("archive", ""),
    ] {
        let api = RecordingApi::new().replying_to_upload(three_students());
        let mut flow = ImportFlow::new(ImportEntity::Students);
        let err = upload(&mut flow, &api, name, mime).await.unwrap_err();
        assert_eq!(err, FlowError::RejectedFileType { name: name.into() });
        assert_eq!(err.notice(ImportEntity::Students).kind, ToastKind::Error);
        assert_eq!(api.network_calls(), 0);
        assert_eq!(flow.phase(), FlowPhase::Idle);
    }
}

#[tokio::test]
async fn scenario_a_clean_student_import() {
    let api = RecordingApi::new()
        .replying_to_upload(three_students())
        .replying_to_confirm(Ok(ConfirmResponse { imported: 3 }));
    let mut flow = ImportFlow::new(ImportEntity::Students);

    let outcome = upload(&mut flow, &api, "students.csv", "text/csv").await.unwrap();
    let notice = outcome.notice(ImportEntity::Students);
    assert_eq!(notice.kind, ToastKind::Success);
    assert!(notice.message.contains("3 students ready to import"));

    let table = PreviewTable::build(flow.preview().unwrap());
    assert!(table.rows.iter().all(|r| r.status == RowStatus::Valid));
    assert_eq!(table.confirm_label(ImportEntity::Students, flow.is_busy()), "Import 3 Students");

    let result = confirm(&mut flow, &api).await.unwrap();
    assert_eq!(
        result.notice(ImportEntity::Students),
        Notice::success("Successfully imported 3 students!")
    );
    assert_eq!(flow.phase(), FlowPhase::Done);

    let redirect = result.redirect(ImportEntity::Students);
    assert_eq!(redirect.route, "/admin");
    assert_eq!(redirect.delay_millis, TOAST_MILLIS);
}

#[tokio::test]
async fn scenario_b_row_errors_are_annotated_but_do_not_block() {
    let mut reply = three_students();
    reply["errors"] = json!([{"row": 2, "errors": [{"message": "Invalid email", "path": ["email"]}]}]);
    let api = RecordingApi::new()
        .replying_to_upload(reply)
        .replying_to_confirm(Ok(ConfirmResponse { imported: 2 }));
    let mut flow = ImportFlow::new(ImportEntity::Students);

    let outcome = upload(&mut flow, &api, "students.csv", "text/csv").await.unwrap();
    assert_eq!(outcome, UploadOutcome::NeedsAttention { rows: 3, errors: 1 });
    assert_eq!(
        outcome.notice(ImportEntity::Students),
        Notice::warning("1 rows have validation errors")
    );

    let table = PreviewTable::build(flow.preview().unwrap());
    assert_eq!(table.rows[0].status, RowStatus::Invalid(vec!["Invalid email".into()]));
    assert!(table.rows[1..].iter().all(|r| r.status.is_valid()));
    assert_eq!(table.flagged_rows(), 1);
    assert_eq!(VALID_MARKER, "✓ Valid");

    // Confirm is still allowed and sends every row, flagged ones included.
    confirm(&mut flow, &api).await.unwrap();
    let confirms = api.confirms.borrow();
    assert_eq!(confirms[0]["students"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn scenario_c_failed_commit_can_be_retried() {
    let api = RecordingApi::new()
        .replying_to_upload(three_students())
        .replying_to_confirm(Err(ApiError::Status {
            status: 400,
            message: Some("Duplicate email".into()),
        }));
    let mut flow = ImportFlow::new(ImportEntity::Students);
    upload(&mut flow, &api, "students.csv", "text/csv").await.unwrap();
    let before = flow.preview().cloned();

    let err = confirm(&mut flow, &api).await.unwrap_err();
    assert_eq!(err.notice(ImportEntity::Students), Notice::error("Duplicate email"));
    assert_eq!(flow.phase(), FlowPhase::Previewing);
    assert_eq!(flow.preview().cloned(), before);
    assert!(!flow.is_busy());

    *api.confirm_reply.borrow_mut() = Some(Ok(ConfirmResponse { imported: 3 }));
    assert_eq!(confirm(&mut flow, &api).await, Ok(ImportResult { imported: 3 }));
    assert_eq!(api.uploads.get(), 1);
    assert_eq!(api.confirms.borrow().len(), 2);
}

#[tokio::test]
async fn flagged_rows_match_distinct_error_rows() {
    let mut reply = three_students();
    reply["errors"] = json!([
        {"row": 2, "errors": [{"message": "Invalid email"}]},
        {"row": 2, "errors": [{"message": "Missing phone"}]},
        {"row": 4, "errors": [{"message": "Unknown batch"}]}
    ]);
    let api = RecordingApi::new().replying_to_upload(reply);
    let mut flow = ImportFlow::new(ImportEntity::Students);
    upload(&mut flow, &api, "students.csv", "text/csv").await.unwrap();

    let table = PreviewTable::build(flow.preview().unwrap());
    assert_eq!(table.flagged_rows(), 2);
    assert!(table.rows[1].status.is_valid());
}

#[tokio::test]
async fn students_confirm_sends_received_rows_restricted_to_allowed_fields() {
    let reply = json!({
        "preview": [
            {"firstName": "Ada", "email": "ada@uni.edu", "internalNote": "x", "batchId": 7},
            {"firstName": "Alan", "email": "", "rowNumber": 3}
        ]
    });
    let api = RecordingApi::new()
        .replying_to_upload(reply.clone())
        .replying_to_confirm(Ok(ConfirmResponse { imported: 2 }));
    let mut flow = ImportFlow::new(ImportEntity::Students);
    upload(&mut flow, &api, "students.csv", "text/csv").await.unwrap();
    confirm(&mut flow, &api).await.unwrap();

    let received: Vec<PreviewRow> = serde_json::from_value(reply["preview"].clone()).unwrap();
    let confirms = api.confirms.borrow();
    let sent = &confirms[0]["students"];
    for (sent, received) in sent.as_array().unwrap().iter().zip(&received) {
        let sent = sent.as_object().unwrap();
        for (key, value) in sent {
            assert!(STUDENT_FIELDS.contains(&key.as_str()));
            assert_eq!(received.get(key), Some(value));
        }
        for column in received.columns() {
            assert_eq!(sent.contains_key(column), STUDENT_FIELDS.contains(&column));
        }
    }
}

#[tokio::test]
async fn teachers_confirm_round_trips_rows_unchanged() {
    let reply = json!({
        "preview": [
            {"firstName": "Maria", "lastName": "Montessori", "email": "mm@uni.edu", "password": "pw", "programCode": "EDU"},
            {"firstName": "John", "lastName": "Dewey", "email": "jd@uni.edu", "password": "pw", "programCode": "PHI"}
        ],
        "errors": [{"row": 3, "errors": [{"message": "Unknown program"}]}]
    });
    let api = RecordingApi::new()
        .replying_to_upload(reply.clone())
        .replying_to_confirm(Ok(ConfirmResponse { imported: 1 }));
    let mut flow = ImportFlow::new(ImportEntity::Teachers);
    upload(&mut flow, &api, "teachers.csv", "application/vnd.ms-excel").await.unwrap();
    let result = confirm(&mut flow, &api).await.unwrap();

    assert_eq!(api.confirms.borrow()[0], json!({"teachers": reply["preview"]}));
    assert_eq!(
        result.notice(ImportEntity::Teachers).message,
        "Successfully imported 1 teachers!"
    );
}

#[tokio::test]
async fn cancel_leaves_nothing_behind_for_the_next_upload() {
    let mut first = three_students();
    first["errors"] = json!([{"row": 3, "errors": [{"message": "Invalid email"}]}]);
    let api = RecordingApi::new().replying_to_upload(first);
    let mut flow = ImportFlow::new(ImportEntity::Students);
    upload(&mut flow, &api, "first.csv", "text/csv").await.unwrap();

    flow.cancel().unwrap();
    assert_eq!(flow.phase(), FlowPhase::Idle);
    assert!(flow.preview().is_none());

    *api.upload_reply.borrow_mut() = Some(Ok(serde_json::from_value(json!({
        "preview": [{"firstName": "Edsger", "email": "ed@uni.edu"}],
        "errors": []
    }))
    .unwrap()));
    let outcome = upload(&mut flow, &api, "second.csv", "text/csv").await.unwrap();
    assert_eq!(outcome, UploadOutcome::Clean { rows: 1 });

    let preview = flow.preview().unwrap();
    assert_eq!(preview.rows().len(), 1);
    assert!(preview.errors().is_empty());
    assert_eq!(PreviewTable::build(preview).flagged_rows(), 0);
}

#[tokio::test]
async fn upload_failure_surfaces_server_message_or_generic_text() {
    let api = RecordingApi::new();
    *api.upload_reply.borrow_mut() = Some(Err(ApiError::Status {
        status: 422,
        message: Some("Missing header: email".into()),
    }));
    let mut flow = ImportFlow::new(ImportEntity::Courses);
    let err = upload(&mut flow, &api, "courses.csv", "text/csv").await.unwrap_err();
    assert_eq!(err.notice(ImportEntity::Courses), Notice::error("Missing header: email"));
    assert_eq!(flow.phase(), FlowPhase::Idle);

    *api.upload_reply.borrow_mut() = Some(Err(ApiError::Network("connection refused".into())));
    let err = upload(&mut flow, &api, "courses.csv", "text/csv").await.unwrap_err();
    assert_eq!(err.notice(ImportEntity::Courses), Notice::error("Failed to upload CSV file"));
}

#[tokio::test]
async fn only_one_commit_is_in_flight() {
    let api = RecordingApi::new()
        .replying_to_upload(three_students())
        .replying_to_confirm(Ok(ConfirmResponse { imported: 3 }));
    let mut flow = ImportFlow::new(ImportEntity::Students);
    upload(&mut flow, &api, "students.csv", "text/csv").await.unwrap();

    let payload = flow.begin_confirm().unwrap();
    // A double click while the first commit is pending.
    let err = confirm(&mut flow, &api).await.unwrap_err();
    assert!(matches!(
        err,
        FlowError::InvalidTransition {
            phase: FlowPhase::Importing,
            ..
        }
    ));
    assert!(api.confirms.borrow().is_empty());

    let result = api.confirm(&payload).await;
    assert_eq!(flow.finish_confirm(result), Ok(ImportResult { imported: 3 }));
    assert_eq!(api.confirms.borrow().len(), 1);
}

#[tokio::test]
async fn errors_without_preview_rows_are_reported_not_dropped() {
    let api = RecordingApi::new().replying_to_upload(json!({
        "preview": [],
        "errors": [
            {"row": 2, "errors": [{"message": "Missing email"}]},
            {"row": 3, "errors": [{"message": "Missing email"}]}
        ]
    }));
    let mut flow = ImportFlow::new(ImportEntity::Students);

    let outcome = upload(&mut flow, &api, "students.csv", "text/csv").await.unwrap();
    assert_eq!(outcome, UploadOutcome::NeedsAttention { rows: 0, errors: 2 });
    assert_eq!(
        outcome.notice(ImportEntity::Students),
        Notice::warning("2 rows have validation errors")
    );
    assert_eq!(flow.phase(), FlowPhase::Previewing);

    let table = PreviewTable::build(flow.preview().unwrap());
    assert!(!table.can_confirm());
    assert_eq!(table.unplaced, ["Row 2: Missing email", "Row 3: Missing email"]);

    assert_eq!(confirm(&mut flow, &api).await, Err(FlowError::NothingToImport));
    assert!(api.confirms.borrow().is_empty());
}

#[tokio::test]
async fn upload_with_neither_rows_nor_errors_returns_to_idle() {
    let api = RecordingApi::new().replying_to_upload(json!({"preview": [], "errors": []}));
    let mut flow = ImportFlow::new(ImportEntity::Courses);
    let outcome = upload(&mut flow, &api, "courses.csv", "text/csv").await.unwrap();
    assert_eq!(outcome, UploadOutcome::Empty);
    assert_eq!(
        outcome.notice(ImportEntity::Courses),
        Notice::warning("The CSV file contains no courses to import.")
    );
    assert_eq!(flow.phase(), FlowPhase::Idle);
}
