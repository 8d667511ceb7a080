use std::fmt;
use std::str::FromStr;

use polars::prelude::*;
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::FlowError;
use crate::schema::{record, scope};
use crate::selection::Selection;

/// Which chart the rows are selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// Every origin for the year; the selected origin is highlighted later.
    Pie,
    /// Selected origin only, strictly positive values.
    Map,
    /// Selected origin only, zero values kept.
    Sankey,
}

impl FilterScope {
    pub const ALL: [FilterScope; 3] = [FilterScope::Pie, FilterScope::Map, FilterScope::Sankey];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterScope::Pie => scope::PIE,
            FilterScope::Map => scope::MAP,
            FilterScope::Sankey => scope::SANKEY,
        }
    }
}

impl fmt::Display for FilterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterScope {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterScope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| FlowError::UnknownScope(s.to_string()))
    }
}

/// Rows of the dataset matching `selection` for the given chart.
pub fn filter(
    dataset: &Dataset,
    selection: &Selection,
    scope: FilterScope,
) -> Result<DataFrame, FlowError> {
    filter_frame(dataset.frame(), selection, scope)
}

/// Same as [`filter`] on a raw frame. Dataset row order is preserved.
///
/// Fails with [`FlowError::UnknownCategory`] when the frame has no column for
/// the selected category; an empty result is not an error.
pub fn filter_frame(
    df: &DataFrame,
    selection: &Selection,
    scope: FilterScope,
) -> Result<DataFrame, FlowError> {
    let value_col = selection.category().column();
    if df.column(value_col).is_err() {
        return Err(FlowError::UnknownCategory(value_col.to_string()));
    }

    // Base: year matches and the category has a value
    let mut predicate = col(record::YEAR)
        .eq(lit(selection.year()))
        .and(col(value_col).is_not_null());

    match scope {
        FilterScope::Pie => {}
        FilterScope::Map => {
            predicate = predicate
                .and(col(value_col).gt(lit(0.0)))
                .and(col(record::ORIGIN).eq(lit(selection.origin())));
        }
        FilterScope::Sankey => {
            predicate = predicate.and(col(record::ORIGIN).eq(lit(selection.origin())));
        }
    }

    let filtered = df.clone().lazy().filter(predicate).collect()?;
    debug!(
        scope = %scope,
        origin = selection.origin(),
        year = selection.year(),
        rows = filtered.height(),
        "filtered records"
    );
    Ok(filtered)
}
