//! # Storage Module
//!
//! Persistence for owners, pets, visits and care records.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! implementation lives in [`sqlite`].

pub mod sqlite;
pub mod traits;

pub use sqlite::{seed::seed_demo_data, DbConnection};
pub use traits::{CareStorage, Connection, OwnerStorage, PetStorage, VisitStorage};
