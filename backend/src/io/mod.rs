//! # IO Module
//!
//! Adapter between HTTP and the domain layer: routing, form and path
//! extraction, view rendering and translation of domain errors into HTTP
//! status codes.

pub mod rest;

pub use rest::*;
