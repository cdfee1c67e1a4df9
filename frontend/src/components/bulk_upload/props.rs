//! Defines the properties for the `BulkUploadPage`.

use common::model::entity::ImportEntity;
use yew::prelude::*;

/// Properties for the `BulkUploadPage`.
#[derive(Properties, PartialEq, Clone)]
pub struct BulkUploadProps {
    /// Which records the page imports. It selects the API endpoints, the
    /// fields forwarded on confirm, the wording and where the user lands
    /// after a successful import.
    pub entity: ImportEntity,
}
