use super::messages::Msg;
use super::state::PivotWidget;
use common::pivot::Aggregator;
use yew::prelude::*;

pub fn update(widget: &mut PivotWidget, ctx: &Context<PivotWidget>, msg: Msg) -> bool {
    let props = ctx.props();
    match msg {
        Msg::DropOnAxis { column, axis } => {
            widget.config.move_field(&column, axis);
        }
        Msg::SetAggregator(name) => {
            let needs_value = Aggregator::from_name(&name).is_some_and(Aggregator::needs_value_field);
            widget.config.aggregator_name = name;
            if needs_value && widget.config.value_fields.is_empty() {
                if let Some(first) = widget.attributes.first() {
                    widget.config.value_fields = vec![first.clone()];
                }
            }
        }
        Msg::SetRenderer(name) => {
            widget.config.renderer_name = name;
        }
        Msg::SetValueField(name) => {
            widget.config.value_fields = if name.is_empty() { Vec::new() } else { vec![name] };
        }
    }
    widget.rebuild(&props.rows.0, props.generation);
    true
}
