use super::messages::Msg;
use super::props::HeaderActivation;
use super::render::render_output;
use super::state::PivotWidget;
use common::gesture::HeaderGesture;
use common::model::pivot::Axis;
use common::pivot::{Aggregator, RendererKind};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, EventTarget, HtmlSelectElement, TouchEvent};
use yew::prelude::*;

pub fn view(widget: &PivotWidget, ctx: &Context<PivotWidget>) -> Html {
    let config = &widget.config;
    let unused: Vec<&String> = widget
        .attributes
        .iter()
        .filter(|a| !config.is_on_axis(a))
        .collect();

    html! {
        <div class="pvt-ui">
            <div class="pvt-controls">
                { renderer_select(widget, ctx) }
                { aggregator_select(widget, ctx) }
            </div>
            { axis_container(widget, ctx, Axis::Unused, "pvt-unused", &unused) }
            { axis_container(widget, ctx, Axis::Cols, "pvt-cols", &config.col_fields.iter().collect::<Vec<_>>()) }
            { axis_container(widget, ctx, Axis::Rows, "pvt-rows", &config.row_fields.iter().collect::<Vec<_>>()) }
            <div class="pvt-output">
                { render_output(&widget.table, config) }
            </div>
        </div>
    }
}

fn renderer_select(widget: &PivotWidget, ctx: &Context<PivotWidget>) -> Html {
    let current = widget.config.renderer_name.clone();
    html! {
        <select
            class="pvt-renderer"
            onchange={ctx.link().callback(|e: Event| {
                Msg::SetRenderer(e.target_unchecked_into::<HtmlSelectElement>().value())
            })}
        >
            { for RendererKind::ALL.iter().map(|r| html! {
                <option value={r.name()} selected={r.name() == current}>{ r.name() }</option>
            }) }
        </select>
    }
}

fn aggregator_select(widget: &PivotWidget, ctx: &Context<PivotWidget>) -> Html {
    let config = &widget.config;
    let needs_value = Aggregator::from_name(&config.aggregator_name)
        .is_some_and(Aggregator::needs_value_field);
    let value_field = config.value_fields.first().cloned().unwrap_or_default();

    html! {
        <>
            <select
                class="pvt-aggregator"
                onchange={ctx.link().callback(|e: Event| {
                    Msg::SetAggregator(e.target_unchecked_into::<HtmlSelectElement>().value())
                })}
            >
                { for Aggregator::ALL.iter().map(|a| html! {
                    <option value={a.name()} selected={a.name() == config.aggregator_name}>{ a.name() }</option>
                }) }
            </select>
            if needs_value {
                <select
                    class="pvt-vals"
                    onchange={ctx.link().callback(|e: Event| {
                        Msg::SetValueField(e.target_unchecked_into::<HtmlSelectElement>().value())
                    })}
                >
                    <option value="" selected={value_field.is_empty()}>{ "(none)" }</option>
                    { for widget.attributes.iter().map(|a| html! {
                        <option value={a.clone()} selected={*a == value_field}>{ a.clone() }</option>
                    }) }
                </select>
            }
        </>
    }
}

fn axis_container(
    widget: &PivotWidget,
    ctx: &Context<PivotWidget>,
    axis: Axis,
    class: &'static str,
    fields: &[&String],
) -> Html {
    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());
    let ondrop = ctx.link().batch_callback(move |e: DragEvent| {
        e.prevent_default();
        e.data_transfer()
            .and_then(|dt| dt.get_data("text/plain").ok())
            .filter(|column| !column.is_empty())
            .map(|column| Msg::DropOnAxis { column, axis })
    });

    html! {
        <ul class={classes!("pvt-axis", class)} {ondragover} {ondrop}>
            { for fields.iter().map(|field| field_chip(widget, ctx, field)) }
        </ul>
    }
}

/// A draggable field chip. The column name travels as the `data-column`
/// attribute; display text is never parsed.
fn field_chip(widget: &PivotWidget, ctx: &Context<PivotWidget>, column: &str) -> Html {
    let props = ctx.props();
    let filtered = props.filtered_columns.iter().any(|c| c == column);
    let intercept = props.intercept_headers;

    let onclick = {
        let on_activate = props.on_header_activate.clone();
        Callback::from(move |e: MouseEvent| {
            if !intercept {
                return;
            }
            if let Some(activation) = activation_from_target(e.target()) {
                e.prevent_default();
                e.stop_propagation();
                on_activate.emit(activation);
            }
        })
    };
    let ontouchstart = {
        let tracker = widget.tap_tracker.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(touch) = e.changed_touches().get(0) {
                tracker.borrow_mut().touch_start(
                    touch.client_x() as f64,
                    touch.client_y() as f64,
                    js_sys::Date::now(),
                );
            }
        })
    };
    let ontouchend = {
        let tracker = widget.tap_tracker.clone();
        let on_activate = props.on_header_activate.clone();
        Callback::from(move |e: TouchEvent| {
            let Some(touch) = e.changed_touches().get(0) else {
                tracker.borrow_mut().cancel();
                return;
            };
            let gesture = tracker.borrow_mut().touch_end(
                touch.client_x() as f64,
                touch.client_y() as f64,
                js_sys::Date::now(),
            );
            if gesture == HeaderGesture::Tap && intercept {
                if let Some(activation) = activation_from_target(e.target()) {
                    // Suppresses the synthetic click that would follow.
                    e.prevent_default();
                    on_activate.emit(activation);
                }
            }
        })
    };
    let ontouchcancel = {
        let tracker = widget.tap_tracker.clone();
        Callback::from(move |_: TouchEvent| tracker.borrow_mut().cancel())
    };
    let ondragstart = {
        let column = column.to_string();
        Callback::from(move |e: DragEvent| {
            if let Some(dt) = e.data_transfer() {
                let _ = dt.set_data("text/plain", &column);
            }
        })
    };

    html! {
        <li
            class={classes!("pvt-attr", filtered.then_some("has-filter"))}
            data-column={column.to_string()}
            draggable="true"
            {onclick}
            {ontouchstart}
            {ontouchend}
            {ontouchcancel}
            {ondragstart}
        >
            <span class="pvt-attr-name">{ column.to_string() }</span>
            if filtered {
                <span class="filter-indicator" title="Filtered">{ "🔍" }</span>
            }
        </li>
    }
}

fn activation_from_target(target: Option<EventTarget>) -> Option<HeaderActivation> {
    let element = target?.dyn_into::<Element>().ok()?;
    let chip = element.closest("[data-column]").ok()??;
    let column = chip.get_attribute("data-column")?;
    let rect = chip.get_bounding_client_rect();
    Some(HeaderActivation {
        column,
        left: rect.left(),
        top: rect.bottom() + 5.0,
    })
}
