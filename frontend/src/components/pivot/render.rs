//! Output renderers: plain table, heatmap and bar chart.

use super::helpers::format_aggregate;
use common::model::pivot::PivotConfig;
use common::pivot::{PivotTable, RendererKind};
use yew::prelude::*;

pub fn render_output(table: &PivotTable, config: &PivotConfig) -> Html {
    match RendererKind::from_name(&config.renderer_name).unwrap_or(RendererKind::Table) {
        RendererKind::Table => pivot_table(table, config, None),
        RendererKind::Heatmap => pivot_table(table, config, table.cell_range()),
        RendererKind::BarChart => bar_chart(table, config),
    }
}

fn key_label(key: &[String]) -> String {
    key.join(" / ")
}

fn heat_style(value: Option<f64>, range: Option<(f64, f64)>) -> Option<String> {
    let (lo, hi) = range?;
    let value = value?;
    let t = if hi > lo { (value - lo) / (hi - lo) } else { 1.0 };
    Some(format!("background-color: rgba(220, 53, 69, {:.2});", 0.1 + 0.6 * t))
}

fn pivot_table(table: &PivotTable, config: &PivotConfig, heat: Option<(f64, f64)>) -> Html {
    let is_count = table.aggregator.is_count();
    let corner = match (config.row_fields.is_empty(), config.col_fields.is_empty()) {
        (_, true) => config.row_fields.join(" / "),
        (true, false) => config.col_fields.join(" / "),
        (false, false) => format!(
            "{} \\ {}",
            config.row_fields.join(" / "),
            config.col_fields.join(" / ")
        ),
    };

    html! {
        <table class="pvt-table">
            <thead>
                <tr>
                    <th class="pvt-axis-label">{ corner }</th>
                    { for table.col_keys.iter().map(|ck| html! {
                        <th class="pvt-col-label">{ key_label(ck) }</th>
                    }) }
                    <th class="pvt-total-label">{ "Totals" }</th>
                </tr>
            </thead>
            <tbody>
                { for table.row_keys.iter().map(|rk| html! {
                    <tr>
                        <th class="pvt-row-label">{ key_label(rk) }</th>
                        { for table.col_keys.iter().map(|ck| {
                            let value = table.value(rk, ck);
                            html! {
                                <td class="pvt-val" style={heat_style(value, heat)}>
                                    { format_aggregate(value, is_count) }
                                </td>
                            }
                        }) }
                        <td class="pvt-total">{ format_aggregate(table.row_total(rk), is_count) }</td>
                    </tr>
                }) }
                <tr>
                    <th class="pvt-total-label">{ "Totals" }</th>
                    { for table.col_keys.iter().map(|ck| html! {
                        <td class="pvt-total">{ format_aggregate(table.col_total(ck), is_count) }</td>
                    }) }
                    <td class="pvt-grand-total">{ format_aggregate(table.grand_total(), is_count) }</td>
                </tr>
            </tbody>
        </table>
    }
}

fn bar_chart(table: &PivotTable, config: &PivotConfig) -> Html {
    let is_count = table.aggregator.is_count();
    let totals: Vec<(String, Option<f64>)> = table
        .row_keys
        .iter()
        .map(|rk| (key_label(rk), table.row_total(rk)))
        .collect();
    let max = totals
        .iter()
        .filter_map(|(_, v)| v.map(f64::abs))
        .fold(0.0_f64, f64::max);

    html! {
        <div class="pvt-bar-chart">
            <div class="pvt-bar-title">
                { format!("{} by {}", config.aggregator_name, config.row_fields.join(" / ")) }
            </div>
            { for totals.into_iter().map(|(label, value)| {
                let width = match value {
                    Some(v) if max > 0.0 => v.abs() / max * 100.0,
                    _ => 0.0,
                };
                html! {
                    <div class="pvt-bar-row">
                        <span class="pvt-bar-label">{ label }</span>
                        <span class="pvt-bar" style={format!("width: {:.1}%;", width)} />
                        <span class="pvt-bar-value">{ format_aggregate(value, is_count) }</span>
                    </div>
                }
            }) }
        </div>
    }
}
