//! Update function for the bulk upload page.
//!
//! Each user action first asks the `ImportFlow` whether it is allowed; only
//! then is the request spawned on the event loop. Its result comes back as a
//! `*Finished` message and is handed to the flow, which decides the next
//! phase and the toast to show.

use common::api::ImportApi;
use common::flow::upload::FileInfo;
use common::flow::notice::Redirect;
use common::flow::FlowError;
use common::model::entity::ImportEntity;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::toast::show_notice;

use super::messages::Msg;
use super::state::BulkUploadPage;

pub fn update(page: &mut BulkUploadPage, ctx: &Context<BulkUploadPage>, msg: Msg) -> bool {
    let entity = page.flow.entity();
    match msg {
        Msg::FileAccepted(file) => {
            let meta = gloo_file::File::from(file.clone());
            let (name, mime) = (meta.name(), meta.raw_mime_type());
            if let Err(err) = page.flow.begin_upload(FileInfo::new(&name, &mime)) {
                report(&err, entity);
                return false;
            }
            page.sync_table();

            gloo_console::log!(format!("uploading {} to {}", name, entity.upload_path()));
            let api = page.api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api.upload_csv(entity, &file).await;
                link.send_message(Msg::UploadFinished(result));
            });
            true
        }
        Msg::UploadFinished(result) => {
            match page.flow.finish_upload(result) {
                Ok(outcome) => show_notice(&outcome.notice(entity)),
                Err(err) => report(&err, entity),
            }
            page.sync_table();
            true
        }
        Msg::Confirm => {
            let payload = match page.flow.begin_confirm() {
                Ok(payload) => payload,
                Err(err) => {
                    report(&err, entity);
                    return false;
                }
            };
            if let Some(first) = payload.rows.first() {
                gloo_console::debug!(format!(
                    "first {} row sent to backend: {}",
                    entity.plural(),
                    serde_json::to_string(first).unwrap_or_default()
                ));
            }

            let api = page.api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api.confirm(&payload).await;
                link.send_message(Msg::ConfirmFinished(result));
            });
            true
        }
        Msg::ConfirmFinished(result) => {
            match page.flow.finish_confirm(result) {
                Ok(imported) => {
                    show_notice(&imported.notice(entity));
                    navigate_after(imported.redirect(entity));
                }
                Err(err) => report(&err, entity),
            }
            page.sync_table();
            true
        }
        Msg::Cancel => match page.flow.cancel() {
            Ok(()) => {
                page.sync_table();
                true
            }
            Err(err) => {
                report(&err, entity);
                false
            }
        },
    }
}

/// Toasts user-facing errors; stale or out-of-order events only hit the console.
fn report(err: &FlowError, entity: ImportEntity) {
    match err {
        FlowError::InvalidTransition { .. } => gloo_console::warn!(err.to_string()),
        FlowError::NoFile => {}
        _ => {
            gloo_console::error!(err.to_string());
            show_notice(&err.notice(entity));
        }
    }
}

/// Leaves for `redirect.route` once the success toast has been on screen.
fn navigate_after(redirect: Redirect) {
    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(redirect.delay_millis).await;
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().set_href(redirect.route) {
                gloo_console::error!(err);
            }
        }
    });
}
