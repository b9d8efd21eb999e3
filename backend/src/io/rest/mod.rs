//! REST endpoints, one module per resource

pub mod care_apis;
pub mod extract;
pub mod owner_apis;
pub mod views;
