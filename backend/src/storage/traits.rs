//! # Storage Traits
//!
//! Storage abstraction traits consumed by the domain layer. Each store is a
//! leaf collaborator: it looks records up and persists them, nothing more.

use anyhow::Result;
use async_trait::async_trait;
use shared::{Care, Owner, Pet, Visit};

/// Lookup and persistence of owners
#[async_trait]
pub trait OwnerStorage: Send + Sync {
    /// Find an owner by ID. The returned owner has no pets attached.
    async fn find_by_id(&self, owner_id: i64) -> Result<Option<Owner>>;

    /// Insert a new owner and return it with its assigned ID
    async fn save(&self, owner: &Owner) -> Result<Owner>;

    /// Number of owners in storage
    async fn count(&self) -> Result<i64>;
}

/// Lookup and persistence of pets
#[async_trait]
pub trait PetStorage: Send + Sync {
    /// Find a pet by ID. Care and visit collections are left empty.
    async fn find_by_id(&self, pet_id: i64) -> Result<Option<Pet>>;

    /// All pets of an owner, ordered by name
    async fn find_by_owner_id(&self, owner_id: i64) -> Result<Vec<Pet>>;

    /// Insert a new pet for its `owner_id` and return it with its assigned ID
    async fn save(&self, pet: &Pet) -> Result<Pet>;
}

/// Lookup and persistence of care records
#[async_trait]
pub trait CareStorage: Send + Sync {
    /// All care records of a pet, oldest first
    async fn find_by_pet_id(&self, pet_id: i64) -> Result<Vec<Care>>;

    /// Insert a new care record, returning it with its fresh ID.
    ///
    /// Records that already carry an ID are rejected.
    async fn save(&self, care: &Care) -> Result<Care>;
}

/// Lookup and persistence of visit records
#[async_trait]
pub trait VisitStorage: Send + Sync {
    /// All visits of a pet, oldest first
    async fn find_by_pet_id(&self, pet_id: i64) -> Result<Vec<Visit>>;

    /// Insert a new visit and return it with its assigned ID
    async fn save(&self, visit: &Visit) -> Result<Visit>;
}

/// A storage backend able to hand out one repository per record type
pub trait Connection: Send + Sync + Clone {
    type OwnerRepository: OwnerStorage + Clone;
    type PetRepository: PetStorage + Clone;
    type CareRepository: CareStorage + Clone;
    type VisitRepository: VisitStorage + Clone;

    fn create_owner_repository(&self) -> Self::OwnerRepository;

    fn create_pet_repository(&self) -> Self::PetRepository;

    fn create_care_repository(&self) -> Self::CareRepository;

    fn create_visit_repository(&self) -> Self::VisitRepository;
}
