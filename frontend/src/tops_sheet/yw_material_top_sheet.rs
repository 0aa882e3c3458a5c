use gloo_timers::future::TimeoutFuture;
use uuid::Uuid;
use yew::{html, AttrValue, Component, Context, Html, NodeRef, Properties};

/// Modal sheet that slides in from the top. Hidden until `open_top_sheet`
/// adds the `show` class.
pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
    #[prop_or_default]
    pub class: AttrValue,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div
                class={format!("top-sheet {}", props.class)}
                id={self.id.clone()}
                ref={props.node_ref.clone()}
            >
                { props.children.clone() }
            </div>
        }
    }
}

pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    toggle_show_later(top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    toggle_show_later(top_sheet_ref, false);
}

/// Flips the `show` class on the next tick so the CSS transition runs after
/// the sheet's content has been laid out.
fn toggle_show_later(top_sheet_ref: NodeRef, show: bool) {
    if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() {
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(50).await;
            let classes = top_sheet.class_list();
            let _ = if show {
                classes.add_1("show")
            } else {
                classes.remove_1("show")
            };
        });
    }
}
