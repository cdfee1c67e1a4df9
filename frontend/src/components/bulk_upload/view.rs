use common::flow::FlowPhase;
use yew::prelude::*;

use crate::components::drop_zone::DropZone;
use crate::components::preview_table::PreviewTableComponent;

use super::messages::Msg;
use super::state::BulkUploadPage;

pub fn view(page: &BulkUploadPage, ctx: &Context<BulkUploadPage>) -> Html {
    let link = ctx.link();
    let entity = page.flow.entity();
    let phase = page.flow.phase();

    let body = match (&page.table, phase) {
        (_, FlowPhase::Done) => html! {
            <div class="upload-done">{"Import complete. Redirecting..."}</div>
        },
        (Some(table), _) => html! {
            <PreviewTableComponent
                entity={entity}
                table={table.clone()}
                loading={phase == FlowPhase::Importing}
                on_confirm={link.callback(|_| Msg::Confirm)}
                on_cancel={link.callback(|_| Msg::Cancel)}
            />
        },
        (None, _) => html! {
            <div class="upload-step">
                <div>
                    <h3>{ entity.upload_heading() }</h3>
                    <p class="upload-step__hint">{ entity.upload_hint() }</p>
                </div>
                <DropZone
                    on_file_accepted={link.callback(Msg::FileAccepted)}
                    loading={phase == FlowPhase::Uploading}
                />
            </div>
        },
    };

    html! {
        <div class="bulk-upload">
            <div class="page-title">{ entity.page_title() }</div>
            <div class="card">{ body }</div>
        </div>
    }
}
