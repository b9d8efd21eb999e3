//! # SQLite Storage Module
//!
//! - **connection.rs** - pool management and schema setup
//! - **repositories/** - one repository per record type
//! - **seed.rs** - demo data for an empty database

pub mod connection;
pub mod repositories;
pub mod seed;

pub use connection::DbConnection;
pub use repositories::{CareRepository, OwnerRepository, PetRepository, VisitRepository};
