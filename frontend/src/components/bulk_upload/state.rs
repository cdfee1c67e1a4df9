//! Component state for the bulk upload page.
//!
//! The page owns one `ImportFlow` for its whole lifetime; mounting the page
//! again (or navigating away and back) starts from a fresh, idle flow.

use std::rc::Rc;

use common::flow::table::PreviewTable;
use common::flow::ImportFlow;
use common::model::entity::ImportEntity;

use crate::api::{HttpImportApi, LocalStorageToken};
use crate::config;

pub struct BulkUploadPage {
    pub flow: ImportFlow,
    pub api: HttpImportApi,
    /// Rendered form of the current preview, rebuilt whenever it changes.
    pub table: Option<Rc<PreviewTable>>,
}

impl BulkUploadPage {
    pub fn new(entity: ImportEntity) -> Self {
        Self {
            flow: ImportFlow::new(entity),
            api: HttpImportApi::new(config::api_base_url(), Rc::new(LocalStorageToken)),
            table: None,
        }
    }

    /// Re-derives `table` from the flow's preview.
    pub fn sync_table(&mut self) {
        self.table = self
            .flow
            .preview()
            .map(|preview| Rc::new(PreviewTable::build(preview)));
    }
}
