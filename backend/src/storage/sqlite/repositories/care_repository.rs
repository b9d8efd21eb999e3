use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::Care;
use sqlx::{sqlite::SqliteRow, Row};
use tracing::debug;

use super::{format_date, parse_stored_date};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::CareStorage;

/// Repository for care records
#[derive(Clone)]
pub struct CareRepository {
    db: DbConnection,
}

impl CareRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_care(row: &SqliteRow) -> Result<Care> {
        let date: String = row.get("care_date");
        Ok(Care {
            id: Some(row.get("id")),
            pet_id: Some(row.get("pet_id")),
            date: parse_stored_date(&date)?,
            description: row.get("description"),
        })
    }

    async fn insert(&self, pet_id: i64, care: &Care) -> Result<Care> {
        let result = sqlx::query(
            r#"
            INSERT INTO cares (pet_id, care_date, description)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(pet_id)
        .bind(format_date(care.date))
        .bind(&care.description)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted care {} for pet {}", id, pet_id);

        Ok(Care {
            id: Some(id),
            pet_id: Some(pet_id),
            ..care.clone()
        })
    }

    #[cfg(test)]
    pub async fn find_by_id(&self, care_id: i64) -> Result<Option<Care>> {
        let row = sqlx::query(
            r#"
            SELECT id, pet_id, care_date, description
            FROM cares
            WHERE id = ?
            "#,
        )
        .bind(care_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_care).transpose()
    }
}

#[async_trait]
impl CareStorage for CareRepository {
    async fn find_by_pet_id(&self, pet_id: i64) -> Result<Vec<Care>> {
        let rows = sqlx::query(
            r#"
            SELECT id, pet_id, care_date, description
            FROM cares
            WHERE pet_id = ?
            ORDER BY care_date ASC, id ASC
            "#,
        )
        .bind(pet_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_care).collect()
    }

    async fn save(&self, care: &Care) -> Result<Care> {
        let pet_id = care
            .pet_id
            .ok_or_else(|| anyhow!("Care must be attached to a pet before it is saved"))?;

        if let Some(id) = care.id {
            return Err(anyhow!("Care {} is already stored", id));
        }

        self.insert(pet_id, care).await
    }
}
