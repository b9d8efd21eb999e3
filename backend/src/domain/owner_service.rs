use shared::Owner;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::{ClinicError, ClinicResult};
use crate::storage::{CareStorage, Connection, OwnerStorage, PetStorage, VisitStorage};

/// Service for the owner details page, the landing page after a care is
/// recorded
#[derive(Clone)]
pub struct OwnerService<C: Connection> {
    owner_repository: C::OwnerRepository,
    pet_repository: C::PetRepository,
    visit_repository: C::VisitRepository,
    care_repository: C::CareRepository,
}

impl<C: Connection> OwnerService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            owner_repository: connection.create_owner_repository(),
            pet_repository: connection.create_pet_repository(),
            visit_repository: connection.create_visit_repository(),
            care_repository: connection.create_care_repository(),
        }
    }

    /// Load an owner with every pet, each carrying its visits and cares
    pub async fn find_owner(&self, owner_id: i64) -> ClinicResult<Owner> {
        info!("Loading owner {}", owner_id);

        let mut owner = self.owner_repository.find_by_id(owner_id).await?.ok_or_else(|| {
            warn!("Owner not found: {}", owner_id);
            ClinicError::OwnerNotFound(owner_id)
        })?;

        let mut pets = self.pet_repository.find_by_owner_id(owner_id).await?;
        for pet in pets.iter_mut() {
            let Some(pet_id) = pet.id else { continue };
            pet.set_visits_internal(self.visit_repository.find_by_pet_id(pet_id).await?);
            pet.set_cares_internal(self.care_repository.find_by_pet_id(pet_id).await?);
        }
        owner.pets = pets;

        info!("Loaded owner {} with {} pets", owner_id, owner.pets.len());
        Ok(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{seed_demo_data, DbConnection};
    use chrono::NaiveDate;
    use shared::{Care, Pet};

    async fn create_test_service() -> (OwnerService<DbConnection>, Arc<DbConnection>) {
        let connection = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        seed_demo_data(&connection).await.expect("Failed to seed");
        (OwnerService::new(connection.clone()), connection)
    }

    #[tokio::test]
    async fn test_find_owner_with_pets_and_visits() {
        let (service, _conn) = create_test_service().await;

        let owner = service.find_owner(4).await.unwrap();
        assert_eq!(owner.last_name, "Coleman");
        let names: Vec<&str> = owner.pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Max", "Samantha"]);
        assert!(owner.pets.iter().all(|p| p.visits().len() == 2));
        assert!(owner.pets.iter().all(|p| p.cares().is_empty()));
    }

    #[tokio::test]
    async fn test_find_owner_includes_cares() {
        let (service, conn) = create_test_service().await;
        let pet: Pet = conn.create_pet_repository().find_by_owner_id(1).await.unwrap().remove(0);

        let mut care = Care::new();
        care.pet_id = pet.id;
        care.date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        care.description = "hairball remedy".to_string();
        conn.create_care_repository().save(&care).await.unwrap();

        let owner = service.find_owner(1).await.unwrap();
        assert_eq!(owner.pets[0].cares().len(), 1);
        assert_eq!(owner.pets[0].cares()[0].description, "hairball remedy");
    }

    #[tokio::test]
    async fn test_find_unknown_owner() {
        let (service, _conn) = create_test_service().await;
        assert!(matches!(service.find_owner(999).await, Err(ClinicError::OwnerNotFound(999))));
    }
}
