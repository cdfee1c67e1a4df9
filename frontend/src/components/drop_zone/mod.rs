//! Drag-and-drop / click-to-browse target that hands exactly one CSV file to
//! its parent.
//!
//! Anything that is not a single CSV file is rejected here, before the parent
//! sees it, and the zone switches to its reject state until the next drag or
//! pick. While `loading` is set every drop and pick is ignored.

use common::flow::drop_target::DropTarget;
use common::flow::upload::{drag_is_rejected, FileInfo, INPUT_ACCEPT};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DropZoneProps {
    pub on_file_accepted: Callback<File>,
    #[prop_or_default]
    pub loading: bool,
}

pub enum Msg {
    DragEnter { rejected: bool },
    DragOver { rejected: bool },
    DragLeave,
    Dropped(Vec<File>),
    Browse { from_picker: bool },
}

pub struct DropZone {
    input_ref: NodeRef,
    target: DropTarget,
}

fn files_of(list: Option<FileList>) -> Vec<File> {
    list.map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default()
}

fn dragged_mime_types(event: &DragEvent) -> Vec<String> {
    event
        .data_transfer()
        .map(|dt| {
            let items = dt.items();
            (0..items.length())
                .filter_map(|i| items.get(i))
                .map(|item| item.type_())
                .collect()
        })
        .unwrap_or_default()
}

fn is_rejected_drag(event: &DragEvent) -> bool {
    drag_is_rejected(&dragged_mime_types(event))
}

impl DropZone {
    fn accept(&mut self, ctx: &Context<Self>, files: Vec<File>) {
        let loading = ctx.props().loading;
        let meta: Vec<(String, String)> = files
            .iter()
            .map(|file| {
                let file = gloo_file::File::from(file.clone());
                (file.name(), file.raw_mime_type())
            })
            .collect();
        let infos: Vec<FileInfo<'_>> = meta
            .iter()
            .map(|(name, mime)| FileInfo::new(name, mime))
            .collect();

        if self.target.drop_files(&infos, loading) {
            if let Some(file) = files.into_iter().next() {
                ctx.props().on_file_accepted.emit(file);
            }
        } else if let Some(reason) = self.target.rejection() {
            gloo_console::warn!(format!("drop zone: {}", reason));
        }
    }
}

impl Component for DropZone {
    type Message = Msg;
    type Properties = DropZoneProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            input_ref: NodeRef::default(),
            target: DropTarget::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let loading = ctx.props().loading;
        match msg {
            Msg::DragEnter { rejected } => self.target.drag_enter(rejected, loading),
            Msg::DragOver { rejected } => self.target.drag_over(rejected, loading),
            Msg::DragLeave => self.target.drag_leave(),
            Msg::Dropped(files) => {
                self.accept(ctx, files);
                true
            }
            Msg::Browse { from_picker } => {
                if self.target.opens_picker(from_picker, loading) {
                    if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
                        input.click();
                    }
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let loading = ctx.props().loading;

        let on_drag_enter = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::DragEnter {
                rejected: is_rejected_drag(&e),
            }
        });
        let on_drag_over = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::DragOver {
                rejected: is_rejected_drag(&e),
            }
        });
        let on_drop = link.callback(|e: DragEvent| {
            e.prevent_default();
            Msg::Dropped(files_of(e.data_transfer().and_then(|dt| dt.files())))
        });
        let on_click = link.callback(|e: MouseEvent| Msg::Browse {
            from_picker: e
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .is_some(),
        });
        let on_change = link.callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let files = files_of(input.files());
            // Allow picking the same file again after a rejection.
            input.set_value("");
            Msg::Dropped(files)
        });

        html! {
            <div
                class={classes!(
                    "drop-zone",
                    self.target.modifier(),
                    loading.then_some("drop-zone--disabled")
                )}
                aria-disabled={loading.to_string()}
                ondragenter={on_drag_enter}
                ondragover={on_drag_over}
                ondragleave={link.callback(|_: DragEvent| Msg::DragLeave)}
                ondrop={on_drop}
                onclick={on_click}
            >
                <input
                    ref={self.input_ref.clone()}
                    type="file"
                    accept={INPUT_ACCEPT}
                    style="display:none;"
                    disabled={loading}
                    onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
                    onchange={on_change}
                />
                <div class="drop-zone__icon">{"📄"}</div>
                <div class="drop-zone__headline">{ self.target.headline(loading) }</div>
                {
                    match self.target.rejection() {
                        Some(reason) => html! { <div class="drop-zone__reason">{reason}</div> },
                        None if self.target.shows_browse_hint() => html! {
                            <div class="drop-zone__sub">{"or click to browse files"}</div>
                        },
                        None => html! {},
                    }
                }
                <div class="drop-zone__hint">{"Only CSV files are accepted"}</div>
            </div>
        }
    }
}
