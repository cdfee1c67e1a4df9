use common::api::ApiError;
use common::model::responses::{ConfirmResponse, UploadResponse};

pub enum Msg {
    FileAccepted(web_sys::File),
    UploadFinished(Result<UploadResponse, ApiError>),
    Confirm,
    ConfirmFinished(Result<ConfirmResponse, ApiError>),
    Cancel,
}
