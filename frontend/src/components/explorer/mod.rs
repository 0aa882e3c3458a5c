//! Data explorer: root component around the pivot widget.
//!
//! Loads data (backend query, bundled sample, or an uploaded file), hands it
//! to the reconciliation controller and renders whatever the controller's
//! surface says should be on screen. Filter editing and saved
//! configurations are driven from here.
//!
//! Shortcuts: Ctrl/Cmd+S saves the configuration, Ctrl/Cmd+O opens the
//! configuration list, Ctrl/Cmd+R resets.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

mod api;
mod dialogs;
mod helpers;
mod messages;
mod state;
pub mod surface;
mod update;
mod view;

pub use messages::Msg;
pub use state::ExplorerComponent;

impl Component for ExplorerComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        ExplorerComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.initialized {
            self.initialized = true;
            self.install_shortcuts(ctx);
            ctx.link().send_message(Msg::LoadFromServer);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(listener) = self.keydown_listener.take() {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let _ = document.remove_event_listener_with_callback(
                    "keydown",
                    listener.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

impl ExplorerComponent {
    fn install_shortcuts(&mut self, ctx: &Context<Self>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let link = ctx.link().clone();
        let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
            if !(e.ctrl_key() || e.meta_key()) {
                return;
            }
            let msg = match e.key().to_lowercase().as_str() {
                "s" => Msg::SaveConfiguration,
                "o" => Msg::OpenConfigSelector,
                "r" => Msg::Reset,
                _ => return,
            };
            e.prevent_default();
            link.send_message(msg);
        });
        if document
            .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
            .is_ok()
        {
            self.keydown_listener = Some(listener);
        }
    }
}
