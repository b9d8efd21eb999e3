use anyhow::Result;
use async_trait::async_trait;
use shared::Owner;
use sqlx::Row;

use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::OwnerStorage;

/// Repository for owners
#[derive(Clone)]
pub struct OwnerRepository {
    db: DbConnection,
}

impl OwnerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OwnerStorage for OwnerRepository {
    async fn find_by_id(&self, owner_id: i64) -> Result<Option<Owner>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, address, city, telephone
            FROM owners
            WHERE id = ?
            "#,
        )
        .bind(owner_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| Owner {
            id: Some(r.get("id")),
            first_name: r.get("first_name"),
            last_name: r.get("last_name"),
            address: r.get("address"),
            city: r.get("city"),
            telephone: r.get("telephone"),
            pets: Vec::new(),
        }))
    }

    async fn save(&self, owner: &Owner) -> Result<Owner> {
        let result = sqlx::query(
            r#"
            INSERT INTO owners (first_name, last_name, address, city, telephone)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(&owner.address)
        .bind(&owner.city)
        .bind(&owner.telephone)
        .execute(self.db.pool())
        .await?;

        let mut saved = owner.clone();
        saved.id = Some(result.last_insert_rowid());
        Ok(saved)
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM owners")
            .fetch_one(self.db.pool())
            .await?;
        Ok(row.get("total"))
    }
}
