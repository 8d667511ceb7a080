use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
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

/// One sankey link: origin node → residence node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

/// Chart-ready flow diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyDiagram {
    pub nodes: Vec<String>,
    pub links: Vec<FlowLink>,
    /// Rendering height hint, grows with the node count.
    pub height: u32,
}

impl SankeyDiagram {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Country name → node position, scoped to a single encoding.
///
/// Codes mean nothing outside the diagram they were built for.
struct CountryIndex {
    positions: HashMap<String, NodeIndex>,
}

impl CountryIndex {
    fn get(&self, name: &str) -> Result<NodeIndex, FlowError> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| FlowError::InvalidData(format!("Country '{name}' has no node")))
    }
}

/// Directed multigraph of origin → residence flows.
///
/// Node indices follow insertion order, so they double as sankey node codes.
/// Parallel edges are kept: every record is its own link.
pub struct FlowGraph {
    graph: DiGraph<String, f64>,
}

impl FlowGraph {
    /// Build the graph from filtered records.
    ///
    /// Required columns: origin, residence and the category column.
    pub fn from_records(df: &DataFrame, category: Category) -> Result<Self, FlowError> {
        let origins = df.column(record::ORIGIN)?.str()?;
        let residences = df.column(record::RESIDENCE)?.str()?;
        let values = df.column(category.column())?.f64()?;

        let mut graph = DiGraph::new();
        let index = Self::add_countries(&mut graph, residences, origins)?;

        for i in 0..df.height() {
            let src = origins
                .get(i)
                .ok_or_else(|| FlowError::InvalidData(format!("Null origin at row {i}")))?;
            let dst = residences
                .get(i)
                .ok_or_else(|| FlowError::InvalidData(format!("Null residence at row {i}")))?;
            let value = values.get(i).ok_or_else(|| {
                FlowError::InvalidData(format!("Null '{}' at row {i}", category.column()))
            })?;
            graph.add_edge(index.get(src)?, index.get(dst)?, value);
        }

        Ok(Self { graph })
    }

    /// Add every residence, then every origin, skipping names already seen.
    fn add_countries(
        graph: &mut DiGraph<String, f64>,
        residences: &StringChunked,
        origins: &StringChunked,
    ) -> Result<CountryIndex, FlowError> {
        let mut positions: HashMap<String, NodeIndex> = HashMap::new();
        for name in residences.into_iter().chain(origins.into_iter()) {
            let name = name.ok_or_else(|| FlowError::InvalidData("Null country name".into()))?;
            positions
                .entry(name.to_string())
                .or_insert_with(|| graph.add_node(name.to_string()));
        }
        Ok(CountryIndex { positions })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node labels in code order.
    pub fn nodes(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// Links in record order.
    pub fn links(&self) -> Vec<FlowLink> {
        self.graph
            .raw_edges()
            .iter()
            .map(|edge| FlowLink {
                source: edge.source().index(),
                target: edge.target().index(),
                value: edge.weight,
            })
            .collect()
    }

    pub fn into_diagram(self, config: &ChartConfig) -> SankeyDiagram {
        let nodes = self.nodes();
        SankeyDiagram {
            height: config.sankey_height(nodes.len()),
            links: self.links(),
            nodes,
        }
    }
}

/// Encode filtered records as sankey nodes and links.
pub fn encode(
    records: &DataFrame,
    category: Category,
    config: &ChartConfig,
) -> Result<SankeyDiagram, FlowError> {
    let graph = FlowGraph::from_records(records, category)?;
    debug!(
        nodes = graph.node_count(),
        links = graph.edge_count(),
        "encoded flow graph"
    );
    Ok(graph.into_diagram(config))
}

/// Flow diagram from the selected origin to its residence countries.
pub fn sankey_diagram(
    dataset: &Dataset,
    selection: &Selection,
    config: &ChartConfig,
) -> Result<SankeyDiagram, FlowError> {
    let records = filter(dataset, selection, FilterScope::Sankey)?;
    encode(&records, selection.category(), config)
}
