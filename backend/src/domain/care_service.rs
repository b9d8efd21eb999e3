//! Care service domain logic: loading a pet with its care history and
//! recording new care events.
use chrono::NaiveDate;
use shared::{Care, FieldError, Pet};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::care_form::{bind_care_form, read_care_form, validate_care};
use crate::domain::errors::{ClinicError, ClinicResult};
use crate::storage::{CareStorage, Connection, PetStorage};

/// A pet loaded for one request, with a fresh empty care attached.
///
/// The new care lives inside the pet's care collection and is addressed by
/// its index there.
#[derive(Debug, Clone, PartialEq)]
pub struct PetCareContext {
    pet: Pet,
    care_index: usize,
}

impl PetCareContext {
    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    /// The care record being built by this request
    pub fn care(&self) -> &Care {
        &self.pet.cares()[self.care_index]
    }

    fn care_mut(&mut self) -> &mut Care {
        &mut self.pet.cares_mut()[self.care_index]
    }

    pub fn into_parts(self) -> (Pet, Care) {
        let care = self.care().clone();
        (self.pet, care)
    }
}

/// Outcome of a care form submission
#[derive(Debug, Clone, PartialEq)]
pub enum CareSubmission {
    /// Nothing was persisted; the form must be shown again
    Invalid {
        pet: Pet,
        care: Care,
        errors: Vec<FieldError>,
    },
    /// Exactly one care record was persisted
    Saved(Care),
}

#[derive(Clone)]
pub struct CareService<C: Connection> {
    pet_repository: C::PetRepository,
    care_repository: C::CareRepository,
}

impl<C: Connection> CareService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            pet_repository: connection.create_pet_repository(),
            care_repository: connection.create_care_repository(),
        }
    }

    /// Fetch a pet and attach all of its persisted care records
    async fn find_pet_with_cares(&self, pet_id: i64) -> ClinicResult<Pet> {
        let mut pet = self.pet_repository.find_by_id(pet_id).await?.ok_or_else(|| {
            warn!("Pet not found: {}", pet_id);
            ClinicError::PetNotFound(pet_id)
        })?;
        let cares = self.care_repository.find_by_pet_id(pet_id).await?;
        pet.set_cares_internal(cares);
        Ok(pet)
    }

    /// Pre-load step run before every care request.
    ///
    /// Fetches the pet, attaches its care history and a new empty care.
    /// Nothing is persisted.
    pub async fn load_pet_with_care(&self, pet_id: i64) -> ClinicResult<PetCareContext> {
        info!("Loading pet {} with care history", pet_id);

        let mut pet = self.find_pet_with_cares(pet_id).await?;
        let care_index = pet.add_care(Care::new());

        info!(
            "Loaded pet {} with {} care records",
            pet_id,
            pet.persisted_cares().count()
        );
        Ok(PetCareContext { pet, care_index })
    }

    /// Care history of a pet. Always re-reads storage.
    pub async fn show_cares(&self, pet_id: i64, date: NaiveDate) -> ClinicResult<Pet> {
        info!("Showing care history for pet {} on {}", pet_id, date);

        let pet = self.find_pet_with_cares(pet_id).await?;

        info!(
            "Pet {} has {} care records, {} on {}",
            pet_id,
            pet.cares().len(),
            pet.cares_on(date).len(),
            date
        );
        Ok(pet)
    }

    /// Bind, validate and, if valid, persist a submitted care form.
    ///
    /// `fields` are the name/value pairs of the submitted body in order. On
    /// any binding or validation failure nothing is written.
    pub async fn process_new_care_form(
        &self,
        mut context: PetCareContext,
        fields: &[(String, String)],
    ) -> ClinicResult<CareSubmission> {
        let pet_id = context.pet().id;
        let (form, mut result) = read_care_form(fields);
        info!("Processing new care form for pet {:?}: {:?}", pet_id, form);

        bind_care_form(context.care_mut(), &form, &mut result);
        validate_care(context.care(), &mut result);

        if result.has_errors() {
            warn!(
                "Rejected care for pet {:?} with {} errors",
                pet_id,
                result.errors().len()
            );
            let (pet, care) = context.into_parts();
            return Ok(CareSubmission::Invalid {
                pet,
                care,
                errors: result.into_errors(),
            });
        }

        let saved = self.care_repository.save(context.care()).await?;
        info!("Saved care {:?} for pet {:?}", saved.id, saved.pet_id);

        Ok(CareSubmission::Saved(saved))
    }
}
