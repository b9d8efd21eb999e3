//! SQLite-based repository implementations

pub mod care_repository;
pub mod owner_repository;
pub mod pet_repository;
pub mod visit_repository;

pub use care_repository::CareRepository;
pub use owner_repository::OwnerRepository;
pub use pet_repository::PetRepository;
pub use visit_repository::VisitRepository;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use shared::DATE_FORMAT;

/// Dates are stored as `yyyy-MM-dd` text
pub(crate) fn parse_stored_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .with_context(|| format!("Stored date '{}' is not in yyyy-MM-dd format", raw))
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
