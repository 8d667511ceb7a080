use std::collections::HashSet;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::{ChartConfig, GeoStyle};
use crate::dataset::Dataset;
use crate::error::FlowError;
use crate::filter::{filter, FilterScope};
use crate::schema::record;
use crate::selection::Selection;

/// A line segment on the map, drawn between two country names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapChart {
    pub routes: Vec<Route>,
    pub style: GeoStyle,
}

impl MapChart {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// One route per distinct residence country, in first-seen order.
pub fn routes(records: &DataFrame, origin: &str) -> Result<Vec<Route>, FlowError> {
    let residences = records.column(record::RESIDENCE)?.str()?;

    let mut seen = HashSet::new();
    let mut routes = Vec::new();
    for residence in residences.into_iter().flatten() {
        if seen.insert(residence) {
            routes.push(Route {
                from: origin.to_string(),
                to: residence.to_string(),
            });
        }
    }
    Ok(routes)
}

/// Routes from the selected origin to every country hosting a positive count.
pub fn map_chart(
    dataset: &Dataset,
    selection: &Selection,
    config: &ChartConfig,
) -> Result<MapChart, FlowError> {
    let records = filter(dataset, selection, FilterScope::Map)?;
    let routes = routes(&records, selection.origin())?;
    debug!(routes = routes.len(), "built map routes");
    Ok(MapChart {
        routes,
        style: config.geo.clone(),
    })
}
