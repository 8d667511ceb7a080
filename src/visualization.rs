//! Visualization module: plotly figure JSON for the three charts.
//!
//! The Python front end hands these documents straight to plotly, so the
//! field names follow plotly's figure schema. Rendering itself happens
//! client-side; this module only maps chart data to traces and layout.

use serde_json::{json, Value};

use crate::aggregation::PieChart;
use crate::config::ChartConfig;
use crate::flow::SankeyDiagram;
use crate::routes::MapChart;
use crate::selection::Selection;

pub const PIE_TITLE: &str = "Country of Origin in comparison";
pub const MAP_TITLE: &str = "Origin and destination countries";

/// Sankey title: category, then origin and year on a second line.
pub fn sankey_title(selection: &Selection) -> String {
    format!(
        "{}<br>Country of Origin: {} ({})",
        selection.category(),
        selection.origin(),
        selection.year()
    )
}

// ── Figures ─────────────────────────────────────────────────────────────────

pub fn pie_figure(pie: &PieChart) -> Value {
    json!({
        "data": [{
            "type": "pie",
            "labels": pie.labels,
            "values": pie.values,
            "pull": pie.pull,
            "textposition": "inside",
        }],
        "layout": { "title": PIE_TITLE },
    })
}

/// One `scattergeo` line trace per route.
pub fn map_figure(map: &MapChart) -> Value {
    let style = &map.style;
    let traces: Vec<Value> = map
        .routes
        .iter()
        .map(|route| {
            json!({
                "type": "scattergeo",
                "locationmode": "country names",
                "locations": [route.from, route.to],
                "mode": "lines",
                "line": { "width": style.line_width, "color": style.line_color },
            })
        })
        .collect();

    json!({
        "data": traces,
        "layout": {
            "title": MAP_TITLE,
            "showlegend": false,
            "geo": {
                "showframe": false,
                "showcoastlines": true,
                "showland": true,
                "showcountries": true,
                "landcolor": style.land_color,
                "countrycolor": style.country_color,
                "coastlinecolor": style.coastline_color,
            },
        },
    })
}

pub fn sankey_figure(diagram: &SankeyDiagram, selection: &Selection, config: &ChartConfig) -> Value {
    let sources: Vec<usize> = diagram.links.iter().map(|l| l.source).collect();
    let targets: Vec<usize> = diagram.links.iter().map(|l| l.target).collect();
    let values: Vec<f64> = diagram.links.iter().map(|l| l.value).collect();

    json!({
        "data": [{
            "type": "sankey",
            "orientation": "h",
            "valueformat": ".0f",
            "domain": { "x": [0, 1], "y": [0, 1] },
            "link": { "source": sources, "target": targets, "value": values },
            "node": {
                "label": diagram.nodes,
                "line": { "color": "black", "width": 0 },
                "pad": config.node_pad,
                "thickness": config.node_thickness,
            },
        }],
        "layout": {
            "title": sankey_title(selection),
            "autosize": true,
            "height": diagram.height,
        },
    })
}

/// Empty chart with a centered message, for selections with nothing to draw.
pub fn placeholder_figure(title: &str, message: &str) -> Value {
    json!({
        "data": [],
        "layout": {
            "title": title,
            "xaxis": { "visible": false },
            "yaxis": { "visible": false },
            "annotations": [{
                "text": message,
                "xref": "paper",
                "yref": "paper",
                "x": 0.5,
                "y": 0.5,
                "showarrow": false,
            }],
        },
    })
}
