use serde::{Deserialize, Serialize};

use super::columns::ReportColumns;
use super::record::{ReportNode, ReportRecord};

/// Report node reduced to pre-formatted text cells.
///
/// The UI renders every report kind through this one shape, so the table
/// component does not need to know the row types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayNode {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub is_total: bool,
    pub cells: Vec<String>,
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    pub fn from_node<R: ReportRecord + ReportColumns>(node: &ReportNode<R>) -> Self {
        Self {
            id: node.id().to_string(),
            name: node.row.display_name().to_string(),
            level: node.row.header().level,
            is_total: node.row.is_total_row(),
            cells: node.row.measures().iter().map(|m| m.display()).collect(),
            children: node.children.iter().map(Self::from_node).collect(),
        }
    }

    pub fn from_forest<R: ReportRecord + ReportColumns>(nodes: &[ReportNode<R>]) -> Vec<Self> {
        nodes.iter().map(Self::from_node).collect()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
