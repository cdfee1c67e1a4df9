//! `fetch`-backed client for the remote import API.
//!
//! Every request goes to `config::api_base_url()` joined with the endpoint
//! path, carries cookies (`credentials: include`) and, when the token provider
//! has one, an `Authorization: Bearer` header. Multipart bodies are handed to
//! the browser as `FormData` so it can set the boundary itself.

use std::rc::Rc;

use common::api::{authorization_header, endpoint, ApiError, ImportApi, TokenProvider};
use common::model::entity::ImportEntity;
use common::model::responses::{ApiErrorBody, ConfirmPayload, ConfirmResponse, UploadResponse};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData, RequestCredentials};

mod token;

pub use token::LocalStorageToken;

#[derive(Clone)]
pub struct HttpImportApi {
    base_url: Rc<str>,
    tokens: Rc<dyn TokenProvider>,
}

impl HttpImportApi {
    pub fn new(base_url: &str, tokens: Rc<dyn TokenProvider>) -> Self {
        Self {
            base_url: Rc::from(base_url),
            tokens,
        }
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let builder =
            Request::post(&endpoint(&self.base_url, path)).credentials(RequestCredentials::Include);
        match authorization_header(self.tokens.as_ref()) {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }
}

fn js_error(err: JsValue) -> ApiError {
    ApiError::Request(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Reads a success body as `T`, or turns a failure status into `ApiError::Status`
/// carrying the server's `error` message when it sent one.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !response.ok() {
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        return Err(ApiError::Status { status, message });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

impl ImportApi for HttpImportApi {
    type Upload = File;

    async fn upload_csv(
        &self,
        entity: ImportEntity,
        file: &File,
    ) -> Result<UploadResponse, ApiError> {
        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(js_error)?;

        let request = self
            .post(&entity.upload_path())
            .body(form)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    async fn confirm(&self, payload: &ConfirmPayload) -> Result<ConfirmResponse, ApiError> {
        let request = self
            .post(&payload.entity.confirm_path())
            .json(payload)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }
}
