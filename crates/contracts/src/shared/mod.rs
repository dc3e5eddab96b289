pub mod dashboard_layout;
pub mod number_format;
