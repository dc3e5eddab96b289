pub mod a002_organization;
