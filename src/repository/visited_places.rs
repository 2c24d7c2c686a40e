//! Visited places repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{
    photos::{delete_owner_photos, load_photo_infos},
    VisitedPlaceStore,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        photo::{OwnerKind, PhotoOwner},
        visited_place::{NewVisitedPlace, VisitedPlace},
    },
};

#[derive(Clone)]
pub struct VisitedPlacesRepository {
    pool: Pool<Postgres>,
}

impl VisitedPlacesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn with_photos(&self, mut places: Vec<VisitedPlace>) -> AppResult<Vec<VisitedPlace>> {
        let ids: Vec<i32> = places.iter().map(|p| p.id).collect();
        let mut photos = load_photo_infos(&self.pool, OwnerKind::VisitedPlace, &ids).await?;
        for place in &mut places {
            place.photos = photos.remove(&place.id).unwrap_or_default();
        }
        Ok(places)
    }

    async fn with_photos_one(&self, place: VisitedPlace) -> AppResult<VisitedPlace> {
        self.with_photos(vec![place])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("Visited place vanished while loading photos".to_string()))
    }
}

#[async_trait]
impl VisitedPlaceStore for VisitedPlacesRepository {
    async fn list(&self) -> AppResult<Vec<VisitedPlace>> {
        let rows = sqlx::query_as::<_, VisitedPlace>(
            "SELECT * FROM visited_places ORDER BY visit_date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        self.with_photos(rows).await
    }

    async fn get_by_id(&self, id: i32) -> AppResult<VisitedPlace> {
        let row = sqlx::query_as::<_, VisitedPlace>("SELECT * FROM visited_places WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Visited place with id {} not found", id)))?;
        self.with_photos_one(row).await
    }

    async fn find_matching(&self, name: &str, country: &str) -> AppResult<Option<VisitedPlace>> {
        let row = sqlx::query_as::<_, VisitedPlace>(
            r#"
            SELECT * FROM visited_places
            WHERE LOWER(name) = LOWER($1) AND LOWER(TRIM(country)) = LOWER(TRIM($2))
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(country)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(place) => Ok(Some(self.with_photos_one(place).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, data: &NewVisitedPlace) -> AppResult<VisitedPlace> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, VisitedPlace>(
            r#"
            INSERT INTO visited_places
                (name, country, visit_date, description_template, description_comment, rating, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.country)
        .bind(data.visit_date)
        .bind(data.description.template)
        .bind(&data.description.comment)
        .bind(data.rating)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, place: &VisitedPlace) -> AppResult<VisitedPlace> {
        let row = sqlx::query_as::<_, VisitedPlace>(
            r#"
            UPDATE visited_places
            SET name = $2, country = $3, visit_date = $4, description_template = $5,
                description_comment = $6, rating = $7, updated_at = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(place.id)
        .bind(&place.name)
        .bind(&place.country)
        .bind(place.visit_date)
        .bind(place.description.template)
        .bind(&place.description.comment)
        .bind(place.rating)
        .bind(place.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Visited place with id {} not found", place.id)))?;
        self.with_photos_one(row).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        delete_owner_photos(&mut tx, PhotoOwner::visited_place(id)).await?;
        let result = sqlx::query("DELETE FROM visited_places WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Visited place with id {} not found", id)));
        }
        tx.commit().await?;
        Ok(())
    }
}
