//! Bulk CSV import page: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic and view rendering.
//!
//! The page shows the drop zone until an upload succeeds, then the preview
//! table until the user cancels or the import is committed.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::BulkUploadProps;
pub use state::BulkUploadPage;

impl Component for BulkUploadPage {
    type Message = Msg;
    type Properties = BulkUploadProps;

    fn create(ctx: &Context<Self>) -> Self {
        BulkUploadPage::new(ctx.props().entity)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().entity != old_props.entity {
            *self = BulkUploadPage::new(ctx.props().entity);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
