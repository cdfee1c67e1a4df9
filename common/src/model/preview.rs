use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::FieldPolicy;

/// Placeholder shown for cells that are missing or empty.
pub const EMPTY_CELL: &str = "-";

/// One normalized CSV record as returned by the upload endpoint.
///
/// Column order is the order the server sent the keys in and is kept for
/// display. Values stay as raw JSON so that what is sent back on confirm is
/// exactly what was received.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewRow(Map<String, Value>);

impl PreviewRow {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text rendered in the preview table for `column`.
    pub fn display_value(&self, column: &str) -> String {
        match self.0.get(column) {
            None | Some(Value::Null) => EMPTY_CELL.to_string(),
            Some(Value::String(s)) if s.is_empty() => EMPTY_CELL.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Copy of the row restricted to what `policy` forwards on confirm.
    pub fn shaped(&self, policy: FieldPolicy) -> PreviewRow {
        match policy {
            FieldPolicy::PassThrough => self.clone(),
            FieldPolicy::AllowList(fields) => fields
                .iter()
                .filter_map(|field| {
                    self.0
                        .get(*field)
                        .map(|value| (field.to_string(), value.clone()))
                })
                .collect(),
        }
    }
}

impl From<Map<String, Value>> for PreviewRow {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for PreviewRow {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
