pub mod a002_organization;
pub mod dashboard_layout;
pub mod reports;
