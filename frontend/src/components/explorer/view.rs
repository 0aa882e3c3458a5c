//! View rendering for the explorer: toolbar, query editor, status bar, the
//! pivot stage, the two dialogs and the console panel.

use super::dialogs::configurations::config_selector_dialog;
use super::dialogs::filter::filter_popover;
use super::messages::Msg;
use super::state::ExplorerComponent;
use super::surface::Stage;
use crate::components::pivot::PivotWidget;
use crate::logger;
use common::model::pivot::PivotConfig;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, InputEvent};
use yew::html::Scope;
use yew::prelude::*;

pub fn view(component: &ExplorerComponent, ctx: &Context<ExplorerComponent>) -> Html {
    let link = ctx.link();
    html! {
        <div class="explorer-root">
            { build_toolbar(component, link) }
            { build_query_editor(component, link) }
            { build_status_bar(component) }
            { build_stage(component, link) }
            { filter_popover(component, link) }
            { config_selector_dialog(component, link) }
            { build_console(component, link) }
        </div>
    }
}

fn build_toolbar(component: &ExplorerComponent, link: &Scope<ExplorerComponent>) -> Html {
    let loading = component.loading;
    html! {
        <div class="icon-toolbar">
            { icon_button("cloud_download", "Load from server", link.callback(|_| Msg::LoadFromServer), loading) }
            { icon_button("dataset", "Sample data", link.callback(|_| Msg::LoadSample), loading) }
            { icon_button("upload_file", "Upload file", link.callback(|_| Msg::OpenUploadDialog), loading) }
            { icon_button("save", "Save config", link.callback(|_| Msg::SaveConfiguration), false) }
            { icon_button("folder_open", "Load config", link.callback(|_| Msg::OpenConfigSelector), false) }
            { icon_button("file_download", "Export config", link.callback(|_| Msg::ExportConfiguration), false) }
            { icon_button("file_upload", "Import config", link.callback(|_| Msg::OpenImportDialog), false) }
            { icon_button("table_view", "Download CSV", link.callback(|_| Msg::DownloadCsv), false) }
            { icon_button("restart_alt", "Reset", link.callback(|_| Msg::Reset), false) }
            { icon_button("terminal", "Console", link.callback(|_| Msg::ToggleConsole), false) }
            <input
                type="file"
                accept=".csv,.xlsx,.xls,.json"
                style="display:none"
                ref={component.upload_input_ref.clone()}
                onchange={link.batch_callback(|e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    input.files().and_then(|files| files.get(0)).map(Msg::FileSelected)
                })}
            />
            <input
                type="file"
                accept=".json"
                style="display:none"
                ref={component.import_input_ref.clone()}
                onchange={link.batch_callback(|e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    input.files().and_then(|files| files.get(0)).map(Msg::ImportFileSelected)
                })}
            />
        </div>
    }
}

fn build_query_editor(component: &ExplorerComponent, link: &Scope<ExplorerComponent>) -> Html {
    html! {
        <div class="query-editor">
            <textarea
                class="query-text"
                rows={4}
                spellcheck="false"
                placeholder="SELECT * FROM ..."
                value={component.query_text.clone()}
                oninput={link.callback(|e: InputEvent| {
                    Msg::SetQueryText(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                })}
            />
            <button class="run-query" disabled={component.loading} onclick={link.callback(|_| Msg::RunQuery)}>
                { "Run Query" }
            </button>
        </div>
    }
}

fn build_status_bar(component: &ExplorerComponent) -> Html {
    let controller = &component.controller;
    let counts = controller.surface().view_counts(controller.store().record_count());
    html! {
        <div class="status-bar">
            <span class="status-records">{ format!("Records: {} / {}", counts.shown, counts.total) }</span>
            <span class="status-columns">{ format!("Columns: {}", counts.columns) }</span>
            <span class="status-filters">{ format!("Active filters: {}", controller.store().active_filters().len()) }</span>
            <span class="status-configs">{ format!("Saved configs: {}", controller.saved_count()) }</span>
            if component.loading {
                <span class="status-loading">{ "Loading..." }</span>
            }
        </div>
    }
}

/// The widget container is keyed by the surface's epoch: a teardown changes
/// the key and Yew mounts a fresh widget instead of updating the old one.
fn build_stage(component: &ExplorerComponent, link: &Scope<ExplorerComponent>) -> Html {
    let surface = component.controller.surface();
    match surface.stage() {
        Stage::Placeholder => html! {
            <div class="pivot-placeholder">
                <p>{ "Load data from the server, the sample set or a file to start exploring." }</p>
            </div>
        },
        Stage::Pivot(frame) => html! {
            <div class="pivot-container" key={surface.container_epoch().to_string()}>
                <PivotWidget
                    rows={frame.rows.clone()}
                    config={frame.config.clone()}
                    generation={frame.generation}
                    intercept_headers={surface.interception_enabled()}
                    filtered_columns={component.filtered_columns()}
                    on_refresh={link.callback(|(generation, config): (u64, PivotConfig)| Msg::WidgetRefreshed(generation, config))}
                    on_settled={link.callback(Msg::RenderSettled)}
                    on_header_activate={link.callback(Msg::HeaderActivated)}
                />
            </div>
        },
    }
}

fn build_console(component: &ExplorerComponent, link: &Scope<ExplorerComponent>) -> Html {
    if !component.console_open {
        return html! {};
    }
    html! {
        <div class="console-panel">
            <div class="console-header">
                <span>{ "Console" }</span>
                <button onclick={link.callback(|_| Msg::ClearConsole)}>{ "Clear" }</button>
                <button onclick={link.callback(|_| Msg::ToggleConsole)}>{ "×" }</button>
            </div>
            <div class="console-body">
                { for logger::entries().iter().rev().map(|entry| html! {
                    <div class={classes!("console-line", entry.class())}>{ entry.line.clone() }</div>
                }) }
            </div>
        </div>
    }
}

/// Renders a toolbar button with a Material icon and a label.
fn icon_button(icon_name: &str, label: &str, on_click: Callback<MouseEvent>, disabled: bool) -> Html {
    html! {
        <button class="icon-btn" onclick={on_click} {disabled}>
            <i class="material-icons">{ icon_name }</i>
            <span class="icon-label">{ label }</span>
        </button>
    }
}
