//! Photo service: uploads, retrieval and removal for both owner kinds

use crate::{
    config::UploadsConfig,
    error::{AppError, AppResult},
    models::photo::{OwnerKind, Photo, PhotoContent, PhotoOwner, PhotoUpload},
    repository::Repository,
};

#[derive(Clone)]
pub struct PhotosService {
    repository: Repository,
    uploads: UploadsConfig,
}

fn photo_not_found(owner: PhotoOwner, photo_id: i32) -> AppError {
    AppError::NotFound(format!("Photo with id {} not found for {}", photo_id, owner))
}

impl PhotosService {
    pub fn new(repository: Repository, uploads: UploadsConfig) -> Self {
        Self { repository, uploads }
    }

    /// NotFound unless the owning record exists
    async fn ensure_owner(&self, owner: PhotoOwner) -> AppResult<()> {
        match owner.kind {
            OwnerKind::Destination => {
                self.repository.destinations.get_by_id(owner.id).await?;
            }
            OwnerKind::VisitedPlace => {
                self.repository.visited_places.get_by_id(owner.id).await?;
            }
        }
        Ok(())
    }

    /// Attach uploaded files to `owner`.
    ///
    /// Every file is checked before anything is written; a single bad file
    /// rejects the whole batch.
    pub async fn upload(&self, owner: PhotoOwner, files: Vec<PhotoUpload>) -> AppResult<Vec<Photo>> {
        if files.is_empty() {
            return Err(AppError::Validation("No photos provided".to_string()));
        }
        self.ensure_owner(owner).await?;

        for file in &files {
            file.check(self.uploads.max_photo_bytes)?;
        }

        let rows = files.into_iter().map(|f| f.into_new_photo(owner)).collect();
        let photos = self.repository.photos.add(rows).await?;
        tracing::info!("Stored {} photo(s) for {}", photos.len(), owner);
        Ok(photos)
    }

    /// Photo with its bytes, provided it belongs to `owner`
    pub async fn get(&self, owner: PhotoOwner, photo_id: i32) -> AppResult<PhotoContent> {
        self.repository
            .photos
            .get_content(photo_id)
            .await?
            .filter(|content| content.photo.owner() == owner)
            .ok_or_else(|| photo_not_found(owner, photo_id))
    }

    pub async fn delete(&self, owner: PhotoOwner, photo_id: i32) -> AppResult<()> {
        if !self.repository.photos.delete(owner, photo_id).await? {
            return Err(photo_not_found(owner, photo_id));
        }
        tracing::info!("Deleted photo id={} of {}", photo_id, owner);
        Ok(())
    }
}
