use polars::prelude::*;

use crate::schema::{category, record};

/// Frame with one row per `(origin, residence, year, value)`; `value` is
/// written to every category column.
pub(crate) fn frame(rows: &[(&str, &str, i64, Option<f64>)]) -> DataFrame {
    let origins: Vec<&str> = rows.iter().map(|r| r.0).collect();
    let residences: Vec<&str> = rows.iter().map(|r| r.1).collect();
    let years: Vec<i64> = rows.iter().map(|r| r.2).collect();
    let values: Vec<Option<f64>> = rows.iter().map(|r| r.3).collect();

    let mut columns = vec![
        Column::new(record::ORIGIN.into(), origins),
        Column::new(record::RESIDENCE.into(), residences),
        Column::new(record::YEAR.into(), years),
    ];
    for name in category::ALL {
        columns.push(Column::new(name.into(), values.clone()));
    }
    DataFrame::new(columns).unwrap()
}
