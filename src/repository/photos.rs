//! Photos repository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::PhotoStore;
use crate::{
    error::AppResult,
    models::photo::{NewPhoto, OwnerKind, Photo, PhotoContent, PhotoInfo, PhotoOwner},
};

/// Every photo column except the image bytes
pub(crate) const PHOTO_COLUMNS: &str = "id, owner_kind, owner_id, file_name, file_path, content_type, \
     file_size, caption, description, date_taken, created_at";

#[derive(Clone)]
pub struct PhotosRepository {
    pool: Pool<Postgres>,
}

impl PhotosRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Photo metadata of the given owners, grouped by owner id
pub(crate) async fn load_photo_infos(
    pool: &Pool<Postgres>,
    kind: OwnerKind,
    owner_ids: &[i32],
) -> AppResult<HashMap<i32, Vec<PhotoInfo>>> {
    let mut grouped: HashMap<i32, Vec<PhotoInfo>> = HashMap::new();
    if owner_ids.is_empty() {
        return Ok(grouped);
    }

    let query = format!(
        "SELECT {} FROM photos WHERE owner_kind = $1 AND owner_id = ANY($2) ORDER BY id",
        PHOTO_COLUMNS
    );
    let rows = sqlx::query_as::<_, Photo>(&query)
        .bind(kind)
        .bind(owner_ids)
        .fetch_all(pool)
        .await?;

    for photo in rows {
        grouped.entry(photo.owner_id).or_default().push(PhotoInfo::from(photo));
    }
    Ok(grouped)
}

/// Remove every photo of one owner inside an open transaction
pub(crate) async fn delete_owner_photos(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    owner: PhotoOwner,
) -> AppResult<u64> {
    let result = sqlx::query("DELETE FROM photos WHERE owner_kind = $1 AND owner_id = $2")
        .bind(owner.kind)
        .bind(owner.id)
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

#[async_trait]
impl PhotoStore for PhotosRepository {
    async fn add(&self, photos: Vec<NewPhoto>) -> AppResult<Vec<Photo>> {
        let query = format!(
            r#"
            INSERT INTO photos (owner_kind, owner_id, file_name, file_path, content_type, image_data, file_size)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            PHOTO_COLUMNS
        );

        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(photos.len());
        for photo in &photos {
            let row = sqlx::query_as::<_, Photo>(&query)
                .bind(photo.owner.kind)
                .bind(photo.owner.id)
                .bind(&photo.file_name)
                .bind(&photo.file_path)
                .bind(&photo.content_type)
                .bind(&photo.data)
                .bind(photo.data.len() as i64)
                .fetch_one(&mut *tx)
                .await?;
            stored.push(row);
        }
        tx.commit().await?;

        Ok(stored)
    }

    async fn get_content(&self, photo_id: i32) -> AppResult<Option<PhotoContent>> {
        let query = format!("SELECT {}, image_data FROM photos WHERE id = $1", PHOTO_COLUMNS);
        let row = sqlx::query_as::<_, PhotoContent>(&query)
            .bind(photo_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, owner: PhotoOwner, photo_id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1 AND owner_kind = $2 AND owner_id = $3")
            .bind(photo_id)
            .bind(owner.kind)
            .bind(owner.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
