//! Request and response bodies exchanged with the remote import API.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::entity::ImportEntity;
use super::preview::PreviewRow;
use super::row_error::RowError;

/// Body of a successful `POST /upload/{entity}/csv`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub preview: Vec<PreviewRow>,
    #[serde(default)]
    pub errors: Vec<RowError>,
}

/// Body of a successful `POST /upload/{entity}/confirm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmResponse {
    pub imported: u64,
}

/// Error body the API sends alongside non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /upload/{entity}/confirm`: `{ "<entity plural>": [rows] }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPayload {
    pub entity: ImportEntity,
    pub rows: Vec<PreviewRow>,
}

impl Serialize for ConfirmPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.entity.payload_key(), &self.rows)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upload_response_without_errors_field() {
        let resp: UploadResponse =
            serde_json::from_value(json!({"preview": [{"email": "a@b.c"}]})).unwrap();
        assert_eq!(resp.preview.len(), 1);
        assert!(resp.errors.is_empty());
    }

    #[test]
    fn confirm_payload_is_keyed_by_entity_plural() {
        let row: PreviewRow = serde_json::from_value(json!({"email": "t@school.edu"})).unwrap();
        let payload = ConfirmPayload {
            entity: ImportEntity::Teachers,
            rows: vec![row],
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"teachers": [{"email": "t@school.edu"}]})
        );
    }

    #[test]
    fn error_body_tolerates_missing_message() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.error, None);
    }
}
