//! Update function for the explorer.
//!
//! Every message is handled by `apply`; afterwards any render the controller
//! requested gets a settle fallback timer, so header interception is re-bound
//! even when the widget never reports that it finished drawing.

use gloo_file::futures::read_as_bytes;
use gloo_file::futures::read_as_text;
use gloo_file::Blob;
use gloo_timers::future::TimeoutFuture;
use log::{error, info, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use common::config::RENDER_SETTLE_FALLBACK_MS;
use common::controller::LoadOutcome;
use common::ingest::{parse_file, to_csv, validate_upload};
use common::model::configuration::ConfigurationSnapshot;
use common::sample::generate_sample_rows;
use common::ExplorerError;

use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet};

use super::api;
use super::helpers::{download_text, now, reset_file_input, show_toast};
use super::messages::Msg;
use super::state::{ExplorerComponent, OpenFilterEditor};

pub fn update(component: &mut ExplorerComponent, ctx: &Context<ExplorerComponent>, msg: Msg) -> bool {
    let rerender = apply(component, ctx, msg);
    schedule_settle_fallback(component, ctx);
    rerender
}

fn schedule_settle_fallback(component: &mut ExplorerComponent, ctx: &Context<ExplorerComponent>) {
    if let Some(generation) = component.controller.surface_mut().take_requested_render() {
        let link = ctx.link().clone();
        spawn_local(async move {
            TimeoutFuture::new(RENDER_SETTLE_FALLBACK_MS).await;
            link.send_message(Msg::RenderSettled(generation));
        });
    }
}

fn apply(component: &mut ExplorerComponent, ctx: &Context<ExplorerComponent>, msg: Msg) -> bool {
    match msg {
        Msg::LoadFromServer => {
            component.loading = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::fetch_default_query().await {
                    Ok(query) => link.send_message(Msg::DefaultQueryLoaded(query)),
                    Err(e) => link.send_message(Msg::LoadFailed(e)),
                }
            });
            true
        }
        Msg::DefaultQueryLoaded(query) => {
            component.query_text = query;
            ctx.link().send_message(Msg::RunQuery);
            true
        }
        Msg::SetQueryText(text) => {
            component.query_text = text;
            false
        }
        Msg::RunQuery => {
            let query = component.query_text.trim().to_string();
            if query.is_empty() {
                show_toast("Please enter a query");
                component.loading = false;
                return true;
            }
            component.loading = true;
            info!("running backend query");
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::submit_query(query).await {
                    Ok(rows) => {
                        let notice = format!("Loaded {} records from database!", rows.len());
                        link.send_message(Msg::DatasetLoaded { rows, notice });
                    }
                    Err(e) => link.send_message(Msg::LoadFailed(e)),
                }
            });
            true
        }
        Msg::LoadSample => {
            component.loading = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::fetch_sample_csv().await {
                    Ok(rows) if !rows.is_empty() => link.send_message(Msg::DatasetLoaded {
                        rows,
                        notice: "Sample data loaded successfully!".to_string(),
                    }),
                    outcome => {
                        if let Err(e) = outcome {
                            warn!("sample file unavailable, generating rows: {}", e);
                        }
                        let rows = generate_sample_rows(js_sys::Math::random);
                        link.send_message(Msg::DatasetLoaded {
                            rows,
                            notice: "Sample data loaded!".to_string(),
                        });
                    }
                }
            });
            true
        }
        Msg::OpenUploadDialog => {
            if let Some(input) = component.upload_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FileSelected(file) => {
            if let Some(input) = component.upload_input_ref.cast::<web_sys::HtmlInputElement>() {
                reset_file_input(&input);
            }
            let name = file.name();
            let kind = match validate_upload(&name, file.size() as u64) {
                Ok(kind) => kind,
                Err(e) => {
                    ctx.link().send_message(Msg::LoadFailed(e));
                    return false;
                }
            };
            info!("reading {} file {}", kind.label(), name);
            component.loading = true;
            let link = ctx.link().clone();
            let blob = Blob::from(file);
            spawn_local(async move {
                let parsed = read_as_bytes(&blob)
                    .await
                    .map_err(|e| ExplorerError::load_failure("Error reading file", e))
                    .and_then(|bytes| parse_file(kind, &bytes));
                match parsed {
                    Ok(rows) if rows.is_empty() => link.send_message(Msg::LoadFailed(
                        ExplorerError::LoadFailure(format!("No data found in {}", name)),
                    )),
                    Ok(rows) => link.send_message(Msg::DatasetLoaded {
                        rows,
                        notice: format!("{} file loaded successfully!", kind.label()),
                    }),
                    Err(e) => link.send_message(Msg::LoadFailed(e)),
                }
            });
            true
        }
        Msg::DatasetLoaded { rows, notice } => {
            component.loading = false;
            component.filter_editor = None;
            let records = rows.len();
            component.controller.load_dataset(rows);
            info!("dataset loaded: {} records", records);
            show_toast(&notice);
            true
        }
        Msg::LoadFailed(e) => {
            component.loading = false;
            error!("{}", e);
            show_toast(&e.to_string());
            true
        }

        Msg::WidgetRefreshed(generation, config) => {
            component.controller.handle_config_change(generation, config)
        }
        Msg::RenderSettled(generation) => component.controller.on_render_settled(generation),
        Msg::HeaderActivated(activation) => {
            match component.controller.open_filter_editor(&activation.column) {
                Ok(draft) => {
                    component.filter_editor = Some(OpenFilterEditor {
                        draft,
                        left: activation.left,
                        top: activation.top,
                    });
                }
                Err(e) => {
                    warn!("{}", e);
                    show_toast(&e.to_string());
                }
            }
            true
        }

        Msg::ToggleValue(value, included) => {
            if let Some(editor) = &mut component.filter_editor {
                editor.draft.set_included(&value, included);
            }
            true
        }
        Msg::SelectAllValues => {
            if let Some(editor) = &mut component.filter_editor {
                editor.draft.select_all();
            }
            true
        }
        Msg::DeselectAllValues => {
            if let Some(editor) = &mut component.filter_editor {
                editor.draft.deselect_all();
            }
            true
        }
        Msg::SetMinInput(text) => {
            if let Some(editor) = &mut component.filter_editor {
                editor.draft.set_min_input(text);
            }
            false
        }
        Msg::SetMaxInput(text) => {
            if let Some(editor) = &mut component.filter_editor {
                editor.draft.set_max_input(text);
            }
            false
        }
        Msg::ApplyFilter => {
            if let Some(editor) = component.filter_editor.take() {
                component.controller.apply_draft(&editor.draft);
                let active = component.controller.store().active_filters().len();
                show_toast(&format!("Filter applied! {} active filter(s)", active));
            }
            true
        }
        Msg::ClearFilter => {
            if let Some(editor) = component.filter_editor.take() {
                component.controller.clear_column_filter(editor.draft.column());
                show_toast("Filter cleared");
            }
            true
        }
        Msg::CloseFilterEditor => {
            component.filter_editor = None;
            true
        }

        Msg::SaveConfiguration => {
            match component.controller.save_current_configuration(now()) {
                Ok(saved) => show_toast(&format!("Configuration saved as {}!", saved.name)),
                Err(e) => show_toast(&e.to_string()),
            }
            true
        }
        Msg::OpenConfigSelector => {
            if component.controller.saved_count() == 0 {
                show_toast("No saved configurations found");
                return false;
            }
            open_top_sheet(component.config_dialog_ref.clone());
            true
        }
        Msg::CloseConfigSelector => {
            close_top_sheet(component.config_dialog_ref.clone());
            false
        }
        Msg::LoadConfiguration(name) => {
            close_top_sheet(component.config_dialog_ref.clone());
            component.filter_editor = None;
            match component.controller.load_configuration(&name) {
                Ok(LoadOutcome::Applied) => show_toast(&format!("Configuration {} loaded!", name)),
                Ok(LoadOutcome::Deferred) => show_toast(&format!(
                    "Configuration {} loaded - now load some data",
                    name
                )),
                Err(e) => show_toast(&e.to_string()),
            }
            true
        }
        Msg::ClearAllConfigurations => {
            close_top_sheet(component.config_dialog_ref.clone());
            component.controller.clear_all_configurations();
            show_toast("All configurations cleared");
            true
        }
        Msg::ExportConfiguration => {
            let exported = component
                .controller
                .export_configuration(now())
                .and_then(|snapshot| {
                    snapshot
                        .to_json_pretty()
                        .map(|json| (snapshot.export_file_name(), json))
                        .map_err(|e| ExplorerError::load_failure("Could not export configuration", e))
                });
            match exported {
                Ok((file_name, json)) => match download_text(&file_name, &json, "application/json") {
                    Ok(()) => show_toast("Configuration exported!"),
                    Err(e) => error!("export download failed: {}", e),
                },
                Err(e) => show_toast(&e.to_string()),
            }
            false
        }
        Msg::OpenImportDialog => {
            if let Some(input) = component.import_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::ImportFileSelected(file) => {
            if let Some(input) = component.import_input_ref.cast::<web_sys::HtmlInputElement>() {
                reset_file_input(&input);
            }
            let link = ctx.link().clone();
            let blob = Blob::from(file);
            spawn_local(async move {
                match read_as_text(&blob).await {
                    Ok(text) => link.send_message(Msg::ConfigurationFileRead(text)),
                    Err(e) => link.send_message(Msg::LoadFailed(ExplorerError::load_failure(
                        "Error reading configuration file",
                        e,
                    ))),
                }
            });
            false
        }
        Msg::ConfigurationFileRead(text) => {
            match ConfigurationSnapshot::from_json(&text) {
                Ok(snapshot) => {
                    component.filter_editor = None;
                    match component.controller.import_configuration(snapshot) {
                        LoadOutcome::Applied => show_toast("Configuration imported!"),
                        LoadOutcome::Deferred => {
                            show_toast("Configuration imported - now load some data")
                        }
                    }
                }
                Err(e) => {
                    error!("invalid configuration file: {}", e);
                    show_toast("Invalid configuration file");
                }
            }
            true
        }
        Msg::Reset => {
            component.filter_editor = None;
            component.controller.reset_all();
            show_toast("Reset complete");
            true
        }

        Msg::DownloadCsv => {
            let Some(rows) = component.controller.surface().shown_rows() else {
                show_toast(&ExplorerError::NoData.to_string());
                return false;
            };
            match to_csv(rows) {
                Ok(csv) => {
                    let file_name = format!("pivot-data-{}.csv", now().timestamp_millis());
                    if let Err(e) = download_text(&file_name, &csv, "text/csv") {
                        error!("csv download failed: {}", e);
                    }
                }
                Err(e) => show_toast(&e.to_string()),
            }
            false
        }
        Msg::ToggleConsole => {
            component.console_open = !component.console_open;
            true
        }
        Msg::ClearConsole => {
            crate::logger::clear();
            true
        }
    }
}
