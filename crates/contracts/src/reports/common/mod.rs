pub mod columns;
pub mod display;
pub mod export;
pub mod hierarchy;
pub mod record;

pub use columns::{Measure, MeasureFormat, ReportColumns};
pub use display::DisplayNode;
pub use export::CsvTable;
pub use hierarchy::{build_hierarchy, count_nodes, flatten, should_consolidate, FlatNode};
pub use record::{ReportNode, ReportRecord, RowHeader, CONSOLIDATED_TOTAL_ID};
