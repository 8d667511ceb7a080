use std::collections::BTreeMap;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::category::Category;
use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::error::FlowError;
use crate::filter::{filter, FilterScope};
use crate::schema::record;
use crate::selection::Selection;

/// Pie-chart series: one slice per origin country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Offset per slice; non-zero only for the selected origin.
    pub pull: Vec<f64>,
}

impl PieChart {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Sum `category` per origin country.
///
/// Keys iterate in lexicographic order so slice positions are reproducible.
pub fn aggregate(records: &DataFrame, category: Category) -> Result<BTreeMap<String, f64>, FlowError> {
    let value_col = category.column();
    let grouped = records
        .clone()
        .lazy()
        .group_by([col(record::ORIGIN)])
        .agg([col(value_col).sum()])
        .collect()?;

    let origins = grouped.column(record::ORIGIN)?.str()?;
    let totals = grouped.column(value_col)?.f64()?;

    let mut shares = BTreeMap::new();
    for (origin, total) in origins.into_iter().zip(totals.into_iter()) {
        let origin = origin.ok_or_else(|| FlowError::InvalidData("Null origin in records".into()))?;
        shares.insert(origin.to_string(), total.unwrap_or(0.0));
    }
    Ok(shares)
}

/// Pull-out weights aligned with `shares`: `offset` at `origin`, zero elsewhere.
///
/// Empty `shares` yields an empty vector. Fails with
/// [`FlowError::CountryNotInResult`] when `origin` has no slice.
pub fn pull_out(
    shares: &BTreeMap<String, f64>,
    origin: &str,
    offset: f64,
) -> Result<Vec<f64>, FlowError> {
    if shares.is_empty() {
        return Ok(Vec::new());
    }
    let position = shares
        .keys()
        .position(|name| name == origin)
        .ok_or_else(|| FlowError::CountryNotInResult(origin.to_string()))?;

    let mut pull = vec![0.0; shares.len()];
    pull[position] = offset;
    Ok(pull)
}

/// Origin-country shares for the selected year and category.
pub fn pie_chart(
    dataset: &Dataset,
    selection: &Selection,
    config: &ChartConfig,
) -> Result<PieChart, FlowError> {
    let records = filter(dataset, selection, FilterScope::Pie)?;
    let shares = aggregate(&records, selection.category())?;
    let pull = pull_out(&shares, selection.origin(), config.pull_offset)?;
    debug!(slices = shares.len(), "built pie chart");

    let (labels, values) = shares.into_iter().unzip();
    Ok(PieChart {
        labels,
        values,
        pull,
    })
}
