//! Business logic services

pub mod destinations;
pub mod photos;
pub mod stats;
pub mod visited_places;

use crate::{config::UploadsConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub destinations: destinations::DestinationsService,
    pub visited_places: visited_places::VisitedPlacesService,
    pub photos: photos::PhotosService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, uploads: UploadsConfig) -> Self {
        Self {
            destinations: destinations::DestinationsService::new(repository.clone()),
            visited_places: visited_places::VisitedPlacesService::new(repository.clone()),
            photos: photos::PhotosService::new(repository.clone(), uploads),
            stats: stats::StatsService::new(repository),
        }
    }
}
