use crate::components::bulk_upload::BulkUploadPage;
use common::model::entity::ImportEntity;
use yew::{html, Component, Context, Html};

/// Picks the page for the current `location.pathname`.
pub struct App {
    entity: Option<ImportEntity>,
}

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();
        Self {
            entity: ImportEntity::from_page_route(&path),
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        match self.entity {
            Some(entity) => html! { <BulkUploadPage entity={entity} /> },
            None => html! {
                <div class="bulk-upload">
                    <div class="page-title">{"Bulk Upload"}</div>
                    <ul class="card import-links">
                        {
                            for ImportEntity::ALL.into_iter().map(|entity| html! {
                                <li>
                                    <a href={entity.page_route()}>{ entity.page_title() }</a>
                                </li>
                            })
                        }
                    </ul>
                </div>
            },
        }
    }
}
