//! Filter popover opened from a pivot header chip.
//!
//! Numeric columns get a min/max range editor with the column's full range
//! and average for reference; other columns get one checkbox per distinct
//! value. Nothing changes until "Apply Filter".

use crate::components::explorer::{ExplorerComponent, Msg};
use common::analysis::ColumnKind;
use common::filter_editor::FilterDraft;
use web_sys::{HtmlInputElement, InputEvent};
use yew::html::Scope;
use yew::prelude::*;

pub fn filter_popover(component: &ExplorerComponent, link: &Scope<ExplorerComponent>) -> Html {
    let Some(editor) = &component.filter_editor else {
        return html! {};
    };
    let draft = &editor.draft;
    let style = format!("position:fixed;left:{}px;top:{}px;z-index:1001;", editor.left, editor.top);

    html! {
        <>
            <div class="filter-backdrop" onclick={link.callback(|_| Msg::CloseFilterEditor)}></div>
            <div class="filter-dropdown" {style}>
                <div class="filter-header">
                    <span class="filter-title">{ format!("Filter: {}", draft.column()) }</span>
                    <button class="filter-close" onclick={link.callback(|_| Msg::CloseFilterEditor)}>{ "×" }</button>
                </div>
                {
                    match &draft.analysis.kind {
                        ColumnKind::Numeric { min, max, avg } => numeric_body(draft, link, *min, *max, *avg),
                        ColumnKind::Categorical { .. } => categorical_body(draft, link),
                    }
                }
                <div class="filter-actions">
                    <button class="filter-apply" onclick={link.callback(|_| Msg::ApplyFilter)}>{ "Apply Filter" }</button>
                    <button class="filter-clear" onclick={link.callback(|_| Msg::ClearFilter)}>{ "Clear Filter" }</button>
                </div>
            </div>
        </>
    }
}

fn numeric_body(draft: &FilterDraft, link: &Scope<ExplorerComponent>, min: f64, max: f64, avg: f64) -> Html {
    html! {
        <div class="filter-numeric">
            <label>{ "Range Filter" }</label>
            <div class="filter-range">
                <input
                    type="number"
                    step="any"
                    placeholder="Min"
                    value={draft.min_input().to_string()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetMinInput(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
                <input
                    type="number"
                    step="any"
                    placeholder="Max"
                    value={draft.max_input().to_string()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetMaxInput(e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </div>
            <div class="filter-stats">
                <div>{ format!("Data range: {:.2} - {:.2}", min, max) }</div>
                <div>{ format!("Average: {:.2}", avg) }</div>
            </div>
        </div>
    }
}

fn categorical_body(draft: &FilterDraft, link: &Scope<ExplorerComponent>) -> Html {
    let values = draft.analysis.unique_values().cloned().unwrap_or_default();
    html! {
        <div class="filter-categorical">
            <div class="filter-bulk">
                <button onclick={link.callback(|_| Msg::SelectAllValues)}>{ "Select All" }</button>
                <button onclick={link.callback(|_| Msg::DeselectAllValues)}>{ "Deselect All" }</button>
            </div>
            <div class="filter-values">
                { for values.iter().map(|value| {
                    let toggled = value.clone();
                    html! {
                        <label class="filter-value">
                            <input
                                type="checkbox"
                                checked={draft.is_included(value)}
                                onchange={link.callback(move |e: Event| {
                                    let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
                                    Msg::ToggleValue(toggled.clone(), checked)
                                })}
                            />
                            <span>{ value.clone() }</span>
                        </label>
                    }
                }) }
            </div>
            <div class="filter-stats">
                { format!("{} unique values, {} total records", values.len(), draft.analysis.total_values) }
            </div>
        </div>
    }
}
