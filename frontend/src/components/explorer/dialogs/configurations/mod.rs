use crate::components::explorer::{ExplorerComponent, Msg};
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;
use common::model::configuration::SavedConfiguration;
use yew::html::Scope;
use yew::prelude::*;

/// Sheet listing the saved configurations; clicking one loads it.
pub fn config_selector_dialog(component: &ExplorerComponent, link: &Scope<ExplorerComponent>) -> Html {
    html! {
        <YwMaterialTopSheet node_ref={component.config_dialog_ref.clone()} class="config-selector">
            <div class="config-dialog">
                <h3>{ "Load Configuration" }</h3>
                <div class="config-list">
                    { for component.controller.saved_configurations().map(|saved| config_entry(saved, link)) }
                </div>
                <div class="config-actions">
                    <button onclick={link.callback(|_| Msg::CloseConfigSelector)}>{ "Cancel" }</button>
                    <button class="danger" onclick={link.callback(|_| Msg::ClearAllConfigurations)}>{ "Clear All" }</button>
                </div>
            </div>
        </YwMaterialTopSheet>
    }
}

fn config_entry(saved: &SavedConfiguration, link: &Scope<ExplorerComponent>) -> Html {
    let snapshot = &saved.snapshot;
    let config = &snapshot.pivot_config;
    let name = saved.name.clone();
    html! {
        <div class="config-item" onclick={link.callback(move |_| Msg::LoadConfiguration(name.clone()))}>
            <div class="config-name">{ saved.name.clone() }</div>
            <div class="config-meta">
                { format!(
                    "{} · {} records",
                    snapshot.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    snapshot.data_info.records
                ) }
            </div>
            <div class="config-fields">
                { format!(
                    "Rows: {} | Cols: {} | Vals: {}",
                    list_or_none(&config.row_fields),
                    list_or_none(&config.col_fields),
                    list_or_none(&config.value_fields)
                ) }
            </div>
            <div class="config-fields">
                { format!("Aggregator: {} | Renderer: {}", config.aggregator_name, config.renderer_name) }
            </div>
        </div>
    }
}

fn list_or_none(fields: &[String]) -> String {
    if fields.is_empty() {
        "None".to_string()
    } else {
        fields.join(", ")
    }
}
