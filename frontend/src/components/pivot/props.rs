use crate::components::explorer::surface::SharedRows;
use common::model::pivot::PivotConfig;
use yew::prelude::*;

/// An intercepted click or tap on a field chip, with the point below the chip
/// where the filter editor should open.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderActivation {
    pub column: String,
    pub left: f64,
    pub top: f64,
}

#[derive(Properties, PartialEq, Clone)]
pub struct PivotWidgetProps {
    pub rows: SharedRows,
    pub config: PivotConfig,
    /// Render generation this instance was drawn for. Echoed back on every
    /// callback.
    pub generation: u64,
    /// Header clicks and taps open the filter editor only while this is set.
    #[prop_or_default]
    pub intercept_headers: bool,
    /// Columns that currently have a filter, marked on their chips.
    #[prop_or_default]
    pub filtered_columns: Vec<String>,
    /// Reports the widget's configuration after each of its refreshes,
    /// including the first one.
    pub on_refresh: Callback<(u64, PivotConfig)>,
    /// Fires once a refresh has reached the page.
    pub on_settled: Callback<u64>,
    pub on_header_activate: Callback<HeaderActivation>,
}
