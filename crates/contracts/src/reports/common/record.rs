use serde::{Deserialize, Serialize};

/// Id of the synthetic node that sums several organizations.
pub const CONSOLIDATED_TOTAL_ID: &str = "consolidated-total";

/// Structural part shared by every report row.
///
/// Report rows arrive flat; the hierarchy is reconstructed from `parent_id`.
/// `level` is only a hint coming from the query and is never used to
/// place a row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowHeader {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub level: u32,
    /// Filled on organization roots (rows without a parent)
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub is_total_row: bool,
}

impl RowHeader {
    pub fn new(id: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(str::to_string),
            ..Default::default()
        }
    }

    /// Header of the synthetic consolidated row
    pub fn consolidated() -> Self {
        Self {
            id: CONSOLIDATED_TOTAL_ID.to_string(),
            is_total_row: true,
            ..Default::default()
        }
    }

    /// Parent reference, with an empty string treated as "no parent"
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|p| !p.is_empty())
    }
}

/// A flat report row that can be arranged into a tree.
///
/// Each report family (cash/bank, debts, inventory, plan-fact) has its own
/// row type with its own numeric measures; the tree builder only needs the
/// structural header, the display name and a way to sum measures.
pub trait ReportRecord: Clone {
    fn header(&self) -> &RowHeader;

    fn display_name(&self) -> &str;

    fn set_display_name(&mut self, name: String);

    /// Add the numeric measures of `other` into `self`
    fn accumulate(&mut self, other: &Self);

    /// Zero-valued row used as the consolidated root
    fn consolidated_total() -> Self;

    fn id(&self) -> &str {
        &self.header().id
    }

    fn parent_id(&self) -> Option<&str> {
        self.header().parent()
    }

    fn is_total_row(&self) -> bool {
        self.header().is_total_row
    }

    fn organization_name(&self) -> Option<&str> {
        self.header().organization_name.as_deref()
    }
}

/// Report row with its children attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportNode<R> {
    #[serde(flatten)]
    pub row: R,
    #[serde(default)]
    pub children: Vec<ReportNode<R>>,
}

impl<R: ReportRecord> ReportNode<R> {
    pub fn id(&self) -> &str {
        self.row.id()
    }
}
