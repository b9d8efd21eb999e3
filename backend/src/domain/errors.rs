use thiserror::Error;

/// Errors surfaced by domain services.
///
/// Form validation failures are not errors: they are an ordinary outcome of
/// a submission and travel in [`crate::domain::CareSubmission`].
#[derive(Debug, Error)]
pub enum ClinicError {
    #[error("Pet not found: {0}")]
    PetNotFound(i64),

    #[error("Owner not found: {0}")]
    OwnerNotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type ClinicResult<T> = Result<T, ClinicError>;
