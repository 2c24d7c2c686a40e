//! Destinations repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{
    photos::{delete_owner_photos, load_photo_infos},
    DestinationStore,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        destination::{CreateDestination, Destination},
        photo::{OwnerKind, PhotoOwner},
    },
};

#[derive(Clone)]
pub struct DestinationsRepository {
    pool: Pool<Postgres>,
}

impl DestinationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn with_photos(&self, mut destinations: Vec<Destination>) -> AppResult<Vec<Destination>> {
        let ids: Vec<i32> = destinations.iter().map(|d| d.id).collect();
        let mut photos = load_photo_infos(&self.pool, OwnerKind::Destination, &ids).await?;
        for destination in &mut destinations {
            destination.photos = photos.remove(&destination.id).unwrap_or_default();
        }
        Ok(destinations)
    }

    async fn with_photos_one(&self, destination: Destination) -> AppResult<Destination> {
        self.with_photos(vec![destination])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("Destination vanished while loading photos".to_string()))
    }
}

#[async_trait]
impl DestinationStore for DestinationsRepository {
    async fn list(&self) -> AppResult<Vec<Destination>> {
        let rows = sqlx::query_as::<_, Destination>("SELECT * FROM destinations ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        self.with_photos(rows).await
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Destination> {
        let row = sqlx::query_as::<_, Destination>("SELECT * FROM destinations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Destination with id {} not found", id)))?;
        self.with_photos_one(row).await
    }

    async fn create(&self, data: &CreateDestination) -> AppResult<Destination> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Destination>(
            r#"
            INSERT INTO destinations (name, country, is_visited, priority, created_at, updated_at)
            VALUES ($1, $2, FALSE, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(data.country.trim())
        .bind(data.priority())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, destination: &Destination) -> AppResult<Destination> {
        let row = sqlx::query_as::<_, Destination>(
            r#"
            UPDATE destinations
            SET name = $2, country = $3, is_visited = $4, priority = $5,
                date_visited = $6, description = $7, rating = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(destination.id)
        .bind(&destination.name)
        .bind(&destination.country)
        .bind(destination.is_visited)
        .bind(destination.priority)
        .bind(destination.date_visited)
        .bind(&destination.description)
        .bind(destination.rating)
        .bind(destination.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Destination with id {} not found", destination.id)))?;
        self.with_photos_one(row).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        delete_owner_photos(&mut tx, PhotoOwner::destination(id)).await?;
        let result = sqlx::query("DELETE FROM destinations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Destination with id {} not found", id)));
        }
        tx.commit().await?;
        Ok(())
    }
}
