//! Visited places service

use chrono::Utc;

use crate::{
    error::AppResult,
    models::visited_place::{CreateVisitedPlace, UpdateVisitedPlace, VisitedPlace},
    repository::Repository,
};

#[derive(Clone)]
pub struct VisitedPlacesService {
    repository: Repository,
}

impl VisitedPlacesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<VisitedPlace>> {
        self.repository.visited_places.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<VisitedPlace> {
        self.repository.visited_places.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateVisitedPlace) -> AppResult<VisitedPlace> {
        let new = data.into_new()?;
        let place = self.repository.visited_places.create(&new).await?;
        tracing::info!("Created visited place id={} ({}, {})", place.id, place.name, place.country);
        Ok(place)
    }

    pub async fn update(&self, id: i32, data: &UpdateVisitedPlace) -> AppResult<VisitedPlace> {
        let mut place = self.repository.visited_places.get_by_id(id).await?;
        data.apply_to(&mut place, Utc::now())?;
        self.repository.visited_places.update(&place).await
    }

    /// Delete a visited place and its photos. A destination still flagged as
    /// visited is left untouched.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.visited_places.delete(id).await?;
        tracing::info!("Deleted visited place id={}", id);
        Ok(())
    }

    /// Rate the place directly; the destination side is not touched
    pub async fn update_rating(&self, id: i32, rating: i32) -> AppResult<VisitedPlace> {
        let mut place = self.repository.visited_places.get_by_id(id).await?;
        place.set_rating(rating, Utc::now());
        self.repository.visited_places.update(&place).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::{
        error::AppError,
        models::{description::Description, visited_place::VisitedPlaceResponse},
        repository::{MockDestinationStore, MockPhotoStore, MockVisitedPlaceStore},
    };

    fn service(places: MockVisitedPlaceStore) -> VisitedPlacesService {
        // Destination mock has no expectations: this service never reaches it
        VisitedPlacesService::new(Repository::from_stores(
            Arc::new(MockDestinationStore::new()),
            Arc::new(places),
            Arc::new(MockPhotoStore::new()),
        ))
    }

    fn louvre(description: Description) -> VisitedPlace {
        let now = Utc::now();
        VisitedPlace {
            id: 3,
            name: "Louvre".into(),
            country: "France".into(),
            visit_date: now,
            description,
            rating: 5,
            photos: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_parses_description() {
        let mut places = MockVisitedPlaceStore::new();
        places
            .expect_create()
            .withf(|data| {
                data.name == "Louvre"
                    && data.description.template.is_some()
                    && data.description.comment.as_deref() == Some("Huge")
            })
            .times(1)
            .returning(|data| {
                let mut place = louvre(data.description.clone());
                place.rating = data.rating;
                Ok(place)
            });

        let request: CreateVisitedPlace = serde_json::from_str(
            r#"{"name":" Louvre ","country":"France","visitDate":"2023-05-02","description":"A nice experience at Louvre! Huge","rating":3}"#,
        )
        .unwrap();
        let place = service(places).create(request).await.unwrap();
        assert_eq!(place.rating, 3);
    }

    #[tokio::test]
    async fn test_direct_rating_swaps_template() {
        let mut places = MockVisitedPlaceStore::new();
        places
            .expect_get_by_id()
            .returning(|_| Ok(louvre(Description::generated(Some(5), Some("Huge".into())))));
        places.expect_update().times(1).returning(|p| Ok(p.clone()));

        let place = service(places).update_rating(3, 1).await.unwrap();
        assert_eq!(place.rating, 1);
        assert_eq!(
            VisitedPlaceResponse::from(place).description,
            "A disappointing experience at Louvre. Huge"
        );
    }

    #[tokio::test]
    async fn test_update_missing_place() {
        let mut places = MockVisitedPlaceStore::new();
        places
            .expect_get_by_id()
            .returning(|id| Err(AppError::NotFound(format!("Visited place with id {} not found", id))));
        places.expect_update().times(0);

        let result = service(places).update(99, &UpdateVisitedPlace::default()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
