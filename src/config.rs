use serde::{Deserialize, Serialize};

use crate::error::FlowError;

// ── Config ──────────────────────────────────────────────────────────────────

/// Tunables for the three charts.
///
/// Every field has a default, so a JSON document only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Offset applied to the selected origin's pie slice
    pub pull_offset: f64,
    /// Sankey height before any nodes are added
    pub sankey_base_height: u32,
    /// Extra sankey height per node
    pub sankey_node_height: u32,
    /// Vertical gap between sankey nodes
    pub node_pad: u32,
    /// Sankey node bar width
    pub node_thickness: u32,
    /// Map background and route styling
    pub geo: GeoStyle,
    /// Annotation shown on empty or unavailable charts
    pub placeholder_message: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            pull_offset: 0.3,
            sankey_base_height: 800,
            sankey_node_height: 5,
            node_pad: 10,
            node_thickness: 30,
            geo: GeoStyle::default(),
            placeholder_message: "No data for this selection".to_string(),
        }
    }
}

impl ChartConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn sankey_height(&self, node_count: usize) -> u32 {
        let per_node = u32::try_from(node_count)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.sankey_node_height);
        self.sankey_base_height.saturating_add(per_node)
    }
}

/// Static map styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoStyle {
    pub land_color: String,
    pub country_color: String,
    pub coastline_color: String,
    pub line_width: u32,
    pub line_color: String,
}

impl Default for GeoStyle {
    fn default() -> Self {
        Self {
            land_color: "rgb(229, 229, 229)".to_string(),
            country_color: "rgb(255, 255, 255)".to_string(),
            coastline_color: "rgb(255, 255, 255)".to_string(),
            line_width: 2,
            line_color: "blue".to_string(),
        }
    }
}
