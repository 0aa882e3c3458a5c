//! Bundled pivot widget.
//!
//! Field chips are dragged between the unused list and the row and column
//! axes; selects pick the aggregator, its value field and the renderer. The
//! output is a table, a heatmap or a bar chart computed by
//! `common::pivot::PivotTable`.
//!
//! After every refresh (its first draw, a new frame from the explorer, or an
//! edit through its own controls) the widget reports its configuration and
//! then signals that the refresh has settled, both tagged with the generation
//! it was drawn for.

use yew::prelude::*;

pub mod helpers;
mod messages;
mod props;
mod render;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::{HeaderActivation, PivotWidgetProps};
pub use state::PivotWidget;

impl Component for PivotWidget {
    type Message = Msg;
    type Properties = PivotWidgetProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        PivotWidget::new(&props.rows.0, props.config.clone(), props.generation)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.generation != old_props.generation
            || props.rows != old_props.rows
            || props.config != old_props.config
        {
            self.reset(&props.rows.0, props.config.clone(), props.generation);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if let Some(generation) = self.pending_refresh.take() {
            let props = ctx.props();
            props.on_refresh.emit((generation, self.config.clone()));
            props.on_settled.emit(generation);
        }
    }
}
