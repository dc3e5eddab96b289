pub mod aggregate;

pub use aggregate::{Organization, OrganizationId};
