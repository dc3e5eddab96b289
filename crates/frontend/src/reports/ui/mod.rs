pub mod compact;
pub mod dashboard;
pub mod filter_bar;
pub mod report_widget;
pub mod tree_table;
