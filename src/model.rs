use std::path::Path;

use pyo3::prelude::*;
use pyo3::types::PyDict;
use pyo3_polars::PyDataFrame;

use crate::category::Category;
use crate::config::ChartConfig;
use crate::dashboard::Dashboard;
use crate::error::FlowError;
use crate::filter::{filter, FilterScope};

#[pyclass]
pub struct RefugeeDashboard {
    inner: Dashboard,
}

#[pymethods]
impl RefugeeDashboard {
    /// Load the `;`-separated refugee dataset.
    ///
    /// `config_json` may override any chart setting, e.g.
    /// `'{"pull_offset": 0.2, "geo": {"line_color": "red"}}'`.
    #[new]
    #[pyo3(signature = (path, config_json=None))]
    fn new(path: &str, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => ChartConfig::from_json(json)?,
            None => ChartConfig::default(),
        };
        let inner = Dashboard::load(Path::new(path), config)?;
        Ok(Self { inner })
    }

    // ── Selector options ────────────────────────────────────────────────────

    /// Origin countries, sorted ascending.
    fn origins(&self) -> Vec<String> {
        self.inner.dataset().origins().to_vec()
    }

    /// Years, latest first.
    fn years(&self) -> Vec<i64> {
        self.inner.dataset().years().to_vec()
    }

    /// Category column names in selector order.
    #[staticmethod]
    fn categories() -> Vec<&'static str> {
        Category::ALL.iter().map(|c| c.column()).collect()
    }

    /// `(origin, year, category)` preselected on first render, or None when
    /// the dataset is empty.
    fn default_selection(&self) -> Option<(String, i64, &'static str)> {
        self.inner
            .dataset()
            .default_selection()
            .map(|sel| (sel.origin().to_string(), sel.year(), sel.category().column()))
    }

    // ── Filtering ───────────────────────────────────────────────────────────

    /// Rows behind one chart. `scope` is "pie", "map" or "sankey".
    fn filter_records(
        &self,
        origin: &str,
        year: i64,
        category: &str,
        scope: &str,
    ) -> PyResult<PyDataFrame> {
        let scope: FilterScope = scope.parse()?;
        let selection = self.inner.select(origin, year, category)?;
        let df = filter(self.inner.dataset(), &selection, scope)?;
        Ok(PyDataFrame(df))
    }

    // ── Rendering ───────────────────────────────────────────────────────────

    /// Recompute all three charts.
    ///
    /// Returns a dict with "pie", "map" and "sankey" plotly figure JSON
    /// strings. Charts without data come back as placeholder figures.
    fn render<'py>(
        &self,
        py: Python<'py>,
        origin: &str,
        year: i64,
        category: &str,
    ) -> PyResult<Bound<'py, PyDict>> {
        let selection = self.inner.select(origin, year, category)?;
        let view = self.inner.render(&selection);
        let figures = self.inner.figures(&view);

        let dict = PyDict::new(py);
        dict.set_item("pie", to_json(&figures.pie)?)?;
        dict.set_item("map", to_json(&figures.map)?)?;
        dict.set_item("sankey", to_json(&figures.sankey)?)?;
        Ok(dict)
    }

    // ── Properties ──────────────────────────────────────────────────────────

    #[getter]
    fn dataset_df(&self) -> PyDataFrame {
        PyDataFrame(self.inner.dataset().frame().clone())
    }
}

fn to_json(value: &serde_json::Value) -> Result<String, FlowError> {
    Ok(serde_json::to_string(value)?)
}
