//! # Domain Module
//!
//! Business logic for care records.
//!
//! - **care_service**: pre-loading a pet with its care history, showing the
//!   history and recording new care events
//! - **care_form**: binding submitted form fields onto a care and validating it
//! - **owner_service**: the owner details page
//! - **errors**: failures that escape the domain layer
//!
//! Services are generic over a storage [`Connection`](crate::storage::Connection)
//! and never cache: every call reads storage again.

pub mod care_form;
pub mod care_service;
pub mod errors;
pub mod owner_service;

pub use care_form::*;
pub use care_service::*;
pub use errors::*;
pub use owner_service::*;
