use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::Visit;
use sqlx::Row;

use super::{format_date, parse_stored_date};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::VisitStorage;

/// Repository for visit records
#[derive(Clone)]
pub struct VisitRepository {
    db: DbConnection,
}

impl VisitRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VisitStorage for VisitRepository {
    async fn find_by_pet_id(&self, pet_id: i64) -> Result<Vec<Visit>> {
        let rows = sqlx::query(
            r#"
            SELECT id, pet_id, visit_date, description
            FROM visits
            WHERE pet_id = ?
            ORDER BY visit_date ASC, id ASC
            "#,
        )
        .bind(pet_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let date: String = row.get("visit_date");
                Ok(Visit {
                    id: Some(row.get("id")),
                    pet_id: Some(row.get("pet_id")),
                    date: parse_stored_date(&date)?,
                    description: row.get("description"),
                })
            })
            .collect()
    }

    async fn save(&self, visit: &Visit) -> Result<Visit> {
        let pet_id = visit
            .pet_id
            .ok_or_else(|| anyhow!("Visit must be attached to a pet before it is saved"))?;

        let result = sqlx::query(
            r#"
            INSERT INTO visits (pet_id, visit_date, description)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(pet_id)
        .bind(format_date(visit.date))
        .bind(&visit.description)
        .execute(self.db.pool())
        .await?;

        Ok(Visit {
            id: Some(result.last_insert_rowid()),
            ..visit.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::{Connection, OwnerStorage, PetStorage};
    use chrono::NaiveDate;
    use shared::{Owner, Pet};

    #[tokio::test]
    async fn test_save_and_find_visits() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let owner = db
            .create_owner_repository()
            .save(&Owner::new("Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"))
            .await
            .unwrap();
        let mut pet = Pet::new("Rosy", NaiveDate::from_ymd_opt(2011, 4, 17).unwrap(), "dog");
        pet.owner_id = owner.id;
        let pet = db.create_pet_repository().save(&pet).await.unwrap();
        let repo = db.create_visit_repository();

        let mut visit = Visit::new(NaiveDate::from_ymd_opt(2013, 1, 2).unwrap(), "rabies shot");
        visit.pet_id = pet.id;
        let saved = repo.save(&visit).await.unwrap();
        assert!(saved.id.is_some());

        let visits = repo.find_by_pet_id(pet.id.unwrap()).await.unwrap();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].description, "rabies shot");
        assert_eq!(visits[0].pet_id, pet.id);
    }

    #[tokio::test]
    async fn test_save_unattached_visit_fails() {
        let db = DbConnection::init_test().await.unwrap();
        let visit = Visit::new(NaiveDate::from_ymd_opt(2013, 1, 2).unwrap(), "spayed");
        assert!(db.create_visit_repository().save(&visit).await.is_err());
    }
}
