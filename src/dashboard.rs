use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::aggregation::{pie_chart, PieChart};
use crate::category::Category;
use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::error::FlowError;
use crate::flow::{sankey_diagram, SankeyDiagram};
use crate::routes::{map_chart, MapChart};
use crate::selection::Selection;
use crate::visualization::{self, MAP_TITLE, PIE_TITLE};

/// Values offered by the three selectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    /// Sorted ascending.
    pub origins: Vec<String>,
    /// Latest first.
    pub years: Vec<i64>,
    pub categories: Vec<Category>,
}

/// The three charts for one selection.
///
/// Each chart is computed on its own; a failure in one leaves the others intact.
#[derive(Debug)]
pub struct DashboardView {
    pub selection: Selection,
    pub pie: Result<PieChart, FlowError>,
    pub map: Result<MapChart, FlowError>,
    pub sankey: Result<SankeyDiagram, FlowError>,
}

/// Figure JSON ready for the front end, one document per chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figures {
    pub pie: Value,
    pub map: Value,
    pub sankey: Value,
}

/// Read-only dataset plus chart settings; safe to share between sessions.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    config: ChartConfig,
}

impl Dashboard {
    pub fn new(dataset: Dataset, config: ChartConfig) -> Self {
        Self { dataset, config }
    }

    pub fn load(path: &Path, config: ChartConfig) -> Result<Self, FlowError> {
        Ok(Self::new(Dataset::load(path)?, config))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn controls(&self) -> Controls {
        Controls {
            origins: self.dataset.origins().to_vec(),
            years: self.dataset.years().to_vec(),
            categories: Category::ALL.to_vec(),
        }
    }

    pub fn select(&self, origin: &str, year: i64, category: &str) -> Result<Selection, FlowError> {
        self.dataset.select(origin, year, category)
    }

    /// Recompute all three charts from the full selection triple.
    pub fn render(&self, selection: &Selection) -> DashboardView {
        info!(
            origin = selection.origin(),
            year = selection.year(),
            category = %selection.category(),
            "rendering dashboard"
        );
        DashboardView {
            selection: selection.clone(),
            pie: pie_chart(&self.dataset, selection, &self.config),
            map: map_chart(&self.dataset, selection, &self.config),
            sankey: sankey_diagram(&self.dataset, selection, &self.config),
        }
    }

    /// Figures for `view`, with placeholders for empty or failed charts.
    pub fn figures(&self, view: &DashboardView) -> Figures {
        let sankey_title = visualization::sankey_title(&view.selection);
        Figures {
            pie: self.figure_or_placeholder(&view.pie, PIE_TITLE, |pie| {
                (!pie.is_empty()).then(|| visualization::pie_figure(pie))
            }),
            map: self.figure_or_placeholder(&view.map, MAP_TITLE, |map| {
                (!map.is_empty()).then(|| visualization::map_figure(map))
            }),
            sankey: self.figure_or_placeholder(&view.sankey, &sankey_title, |diagram| {
                (!diagram.is_empty())
                    .then(|| visualization::sankey_figure(diagram, &view.selection, &self.config))
            }),
        }
    }

    fn figure_or_placeholder<T>(
        &self,
        chart: &Result<T, FlowError>,
        title: &str,
        figure: impl FnOnce(&T) -> Option<Value>,
    ) -> Value {
        let message = match chart {
            Ok(data) => match figure(data) {
                Some(fig) => return fig,
                None => self.config.placeholder_message.clone(),
            },
            Err(err) if err.is_no_data() => self.config.placeholder_message.clone(),
            Err(err) => {
                warn!(chart = title, error = %err, "chart failed");
                err.to_string()
            }
        };
        visualization::placeholder_figure(title, &message)
    }
}
