//! Explorer state: the reconciliation controller driving the pivot widget,
//! plus the UI state around it.

use super::surface::YewSurface;
use common::controller::ReconciliationController;
use common::filter_editor::FilterDraft;
use common::filter_store::FilterStore;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::prelude::*;

/// The filter popover, open for one column.
pub struct OpenFilterEditor {
    pub draft: FilterDraft,
    /// Viewport position just below the activated header chip.
    pub left: f64,
    pub top: f64,
}

pub struct ExplorerComponent {
    pub controller: ReconciliationController<YewSurface>,
    /// Contents of the query editor.
    pub query_text: String,
    pub filter_editor: Option<OpenFilterEditor>,
    pub upload_input_ref: NodeRef,
    pub import_input_ref: NodeRef,
    pub config_dialog_ref: NodeRef,
    /// A load is in flight; load buttons are disabled.
    pub loading: bool,
    pub console_open: bool,
    /// Guard for first-render initialisation.
    pub initialized: bool,
    /// Document-level shortcut handler, kept alive for the component's
    /// lifetime and detached on destroy.
    pub keydown_listener: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl ExplorerComponent {
    pub fn new() -> Self {
        Self {
            controller: ReconciliationController::new(FilterStore::new(), YewSurface::default()),
            query_text: String::new(),
            filter_editor: None,
            upload_input_ref: NodeRef::default(),
            import_input_ref: NodeRef::default(),
            config_dialog_ref: NodeRef::default(),
            loading: false,
            console_open: true,
            initialized: false,
            keydown_listener: None,
        }
    }

    /// Columns with an active filter, for the chip badges.
    pub fn filtered_columns(&self) -> Vec<String> {
        self.controller
            .store()
            .active_filters()
            .keys()
            .cloned()
            .collect()
    }
}
