//! Filter-and-transform core of the refugee movements dashboard.
//!
//! A [`Dataset`] is loaded once; every user selection is turned into three
//! independent chart payloads: origin shares for a pie chart, routes for a
//! map and a sankey flow diagram. Built with the `python` feature, the crate
//! is also the `_core` extension module used by the Python front end.

mod aggregation;
mod category;
mod config;
mod dashboard;
mod dataset;
mod error;
mod filter;
mod flow;
pub mod logging;
mod routes;
pub mod schema;
mod selection;
pub mod visualization;

#[cfg(feature = "python")]
mod model;
#[cfg(test)]
mod test_support;

pub use aggregation::{aggregate, pie_chart, pull_out, PieChart};
pub use category::Category;
pub use config::{ChartConfig, GeoStyle};
pub use dashboard::{Controls, Dashboard, DashboardView, Figures};
pub use dataset::Dataset;
pub use error::FlowError;
pub use filter::{filter, filter_frame, FilterScope};
pub use flow::{encode, sankey_diagram, FlowGraph, FlowLink, SankeyDiagram};
pub use routes::{map_chart, routes, MapChart, Route};
pub use selection::Selection;

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyModule;

/// Export schema constants as Python submodules
#[cfg(feature = "python")]
fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Record
    let record = PyModule::new(m.py(), "record")?;
    record.add("ORIGIN", schema::record::ORIGIN)?;
    record.add("RESIDENCE", schema::record::RESIDENCE)?;
    record.add("YEAR", schema::record::YEAR)?;
    m.add_submodule(&record)?;

    // Category
    let category = PyModule::new(m.py(), "category")?;
    category.add("REFUGEES", schema::category::REFUGEES)?;
    category.add("REFUGEES_ASSISTED", schema::category::REFUGEES_ASSISTED)?;
    category.add("REFUGEE_LIKE", schema::category::REFUGEE_LIKE)?;
    category.add(
        "REFUGEE_LIKE_ASSISTED",
        schema::category::REFUGEE_LIKE_ASSISTED,
    )?;
    category.add("ALL", schema::category::ALL.to_vec())?;
    m.add_submodule(&category)?;

    // Scope
    let scope = PyModule::new(m.py(), "scope")?;
    scope.add("PIE", schema::scope::PIE)?;
    scope.add("MAP", schema::scope::MAP)?;
    scope.add("SANKEY", schema::scope::SANKEY)?;
    m.add_submodule(&scope)?;

    Ok(())
}

/// Install a tracing subscriber; `level` is an env-filter directive.
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(name = "init_logging", signature = (level=None))]
fn py_init_logging(level: Option<&str>) -> bool {
    logging::init_logging(level)
}

#[cfg(feature = "python")]
#[pymodule]
#[pyo3(name = "_core")]
fn refugee_flows_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<model::RefugeeDashboard>()?;
    m.add_function(wrap_pyfunction!(py_init_logging, m)?)?;
    add_schema_exports(m)?;
    Ok(())
}
