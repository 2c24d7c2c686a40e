//! Repository layer for database operations
//!
//! Each store is a trait so services can run against PostgreSQL in
//! production and against mocks or in-memory stores in tests.

pub mod destinations;
pub mod photos;
pub mod visited_places;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        destination::{CreateDestination, Destination},
        photo::{NewPhoto, Photo, PhotoContent, PhotoOwner},
        visited_place::{NewVisitedPlace, VisitedPlace},
    },
};

/// Destinations, loaded with their photo metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DestinationStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Destination>>;

    /// NotFound when absent
    async fn get_by_id(&self, id: i32) -> AppResult<Destination>;

    async fn create(&self, data: &CreateDestination) -> AppResult<Destination>;

    /// Persist every column of `destination`
    async fn update(&self, destination: &Destination) -> AppResult<Destination>;

    /// Delete the destination and its photos
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Visited places, loaded with their photo metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitedPlaceStore: Send + Sync {
    /// Most recent visit first
    async fn list(&self) -> AppResult<Vec<VisitedPlace>>;

    async fn get_by_id(&self, id: i32) -> AppResult<VisitedPlace>;

    /// First place (lowest id) matching `name`/`country`, see
    /// [`crate::models::visited_place::same_place`]
    async fn find_matching(&self, name: &str, country: &str) -> AppResult<Option<VisitedPlace>>;

    async fn create(&self, data: &NewVisitedPlace) -> AppResult<VisitedPlace>;

    async fn update(&self, place: &VisitedPlace) -> AppResult<VisitedPlace>;

    /// Delete the place and its photos
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Photo rows of both owner kinds
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store all photos or none
    async fn add(&self, photos: Vec<NewPhoto>) -> AppResult<Vec<Photo>>;

    async fn get_content(&self, photo_id: i32) -> AppResult<Option<PhotoContent>>;

    /// Returns false when the photo does not exist or belongs to another owner
    async fn delete(&self, owner: PhotoOwner, photo_id: i32) -> AppResult<bool>;
}

/// Main repository struct holding the stores
#[derive(Clone)]
pub struct Repository {
    pub destinations: Arc<dyn DestinationStore>,
    pub visited_places: Arc<dyn VisitedPlaceStore>,
    pub photos: Arc<dyn PhotoStore>,
}

impl Repository {
    /// Create a PostgreSQL-backed repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            destinations: Arc::new(destinations::DestinationsRepository::new(pool.clone())),
            visited_places: Arc::new(visited_places::VisitedPlacesRepository::new(pool.clone())),
            photos: Arc::new(photos::PhotosRepository::new(pool)),
        }
    }

    /// Assemble a repository from arbitrary store implementations
    pub fn from_stores(
        destinations: Arc<dyn DestinationStore>,
        visited_places: Arc<dyn VisitedPlaceStore>,
        photos: Arc<dyn PhotoStore>,
    ) -> Self {
        Self {
            destinations,
            visited_places,
            photos,
        }
    }
}
