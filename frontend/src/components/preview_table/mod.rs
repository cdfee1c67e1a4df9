//! Preview of the rows the server parsed from an uploaded CSV.
//!
//! The component only renders a [`PreviewTable`]; row/error matching and all
//! labels are computed in `common::flow::table`. Cancel and Confirm are
//! reported to the parent through callbacks and both are disabled while a
//! commit is in flight. Confirm is also disabled when the upload produced
//! errors but no rows.

use std::rc::Rc;

use common::flow::table::{PreviewTable, RowStatus, VALID_MARKER};
use common::model::entity::ImportEntity;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PreviewTableProps {
    pub entity: ImportEntity,
    pub table: Rc<PreviewTable>,
    /// A commit is in flight: both actions are disabled.
    #[prop_or_default]
    pub loading: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Read-only table of the rows the server parsed, with each row's
/// validation status in the last column.
pub struct PreviewTableComponent;

/// Renders the status column for one row.
///
/// # Arguments
///
/// * `status` - the row's validation status
///
/// # Returns
///
/// The green valid marker, or one line per error message in red.
fn status_cell(status: &RowStatus) -> Html {
    match status {
        RowStatus::Valid => html! { <span class="status-valid">{VALID_MARKER}</span> },
        RowStatus::Invalid(messages) => html! {
            <div class="status-invalid">
                { for messages.iter().map(|m| html! { <div>{m}</div> }) }
            </div>
        },
    }
}

impl Component for PreviewTableComponent {
    type Message = ();
    type Properties = PreviewTableProps;

    fn create(_ctx: &Context<Self>) -> Self {
        PreviewTableComponent
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let table = &props.table;

        html! {
            <div class="preview">
                <div class="preview__header">
                    <h3>{ table.heading(props.entity) }</h3>
                    <div class="preview__actions">
                        <button
                            class="btn btn--secondary"
                            disabled={props.loading}
                            onclick={props.on_cancel.reform(|_: MouseEvent| ())}
                        >
                            {"Cancel"}
                        </button>
                        <button
                            class="btn btn--primary"
                            disabled={props.loading || !table.can_confirm()}
                            onclick={props.on_confirm.reform(|_: MouseEvent| ())}
                        >
                            { table.confirm_label(props.entity, props.loading) }
                        </button>
                    </div>
                </div>

                <div class="preview__scroll">
                    <table>
                        <thead>
                            <tr>
                                { for table.columns.iter().map(|c| html! { <th>{c}</th> }) }
                                <th>{"Status"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {
                                for table.rows.iter().map(|row| html! {
                                    <tr
                                        key={row.index.to_string()}
                                        class={classes!("preview__row", (!row.status.is_valid()).then_some("preview__row--invalid"))}
                                    >
                                        { for row.cells.iter().map(|cell| html! { <td>{cell}</td> }) }
                                        <td>{ status_cell(&row.status) }</td>
                                    </tr>
                                })
                            }
                        </tbody>
                    </table>
                </div>

                {
                    match table.error_summary() {
                        Some(summary) => html! {
                            <div class="preview__errors">
                                <h4>{summary}</h4>
                                { for table.unplaced.iter().map(|m| html! { <div class="preview__unplaced">{m}</div> }) }
                                <div>{"Please fix the errors before importing, or remove invalid rows."}</div>
                            </div>
                        },
                        None => html! {},
                    }
                }
            </div>
        }
    }
}
