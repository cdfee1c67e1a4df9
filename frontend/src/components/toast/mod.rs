//! Transient notifications in the top-right corner.
//!
//! Toasts are plain DOM nodes appended to `<body>` and removed by a timer, so
//! they survive the component that raised them being re-rendered.

use common::flow::notice::{Notice, ToastKind, TOAST_MILLIS};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

fn background(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "#2e7d32",
        ToastKind::Warning => "#ed6c02",
        ToastKind::Error => "#d32f2f",
    }
}

/// Shows `notice` for a few seconds. The message is inserted as text, never
/// as markup, since it may come straight from the server.
pub fn show_notice(notice: &Notice) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    toast.set_text_content(Some(&notice.message));
    toast.set_attribute("role", "status").ok();
    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("top", "24px").ok();
    style.set_property("right", "24px").ok();
    style.set_property("background", background(notice.kind)).ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "12px 24px").ok();
    style.set_property("border-radius", "12px").ok();
    style.set_property("box-shadow", "0 4px 12px rgba(0, 0, 0, 0.2)").ok();
    style.set_property("font-weight", "600").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MILLIS).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}
