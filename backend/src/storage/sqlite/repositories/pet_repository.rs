use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::Pet;
use sqlx::{sqlite::SqliteRow, Row};

use super::{format_date, parse_stored_date};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::PetStorage;

/// Repository for pets
#[derive(Clone)]
pub struct PetRepository {
    db: DbConnection,
}

impl PetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_pet(row: &SqliteRow) -> Result<Pet> {
        let birth_date: String = row.get("birth_date");
        let name: String = row.get("name");
        let type_name: String = row.get("type_name");
        let mut pet = Pet::new(&name, parse_stored_date(&birth_date)?, &type_name);
        pet.id = Some(row.get("id"));
        pet.owner_id = Some(row.get("owner_id"));
        Ok(pet)
    }
}

#[async_trait]
impl PetStorage for PetRepository {
    async fn find_by_id(&self, pet_id: i64) -> Result<Option<Pet>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, birth_date, type_name, owner_id
            FROM pets
            WHERE id = ?
            "#,
        )
        .bind(pet_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_pet).transpose()
    }

    async fn find_by_owner_id(&self, owner_id: i64) -> Result<Vec<Pet>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, birth_date, type_name, owner_id
            FROM pets
            WHERE owner_id = ?
            ORDER BY name ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_pet).collect()
    }

    async fn save(&self, pet: &Pet) -> Result<Pet> {
        let owner_id = pet
            .owner_id
            .ok_or_else(|| anyhow!("Pet '{}' has no owner", pet.name))?;

        let result = sqlx::query(
            r#"
            INSERT INTO pets (name, birth_date, type_name, owner_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&pet.name)
        .bind(format_date(pet.birth_date))
        .bind(&pet.type_name)
        .bind(owner_id)
        .execute(self.db.pool())
        .await?;

        let mut saved = pet.clone();
        saved.id = Some(result.last_insert_rowid());
        Ok(saved)
    }
}
