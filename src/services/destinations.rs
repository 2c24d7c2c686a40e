//! Destinations service
//!
//! Besides plain CRUD this keeps visited places in step with destinations:
//! a destination that becomes visited is mirrored into a visited place, one
//! that stops being visited loses its mirror, and rating a visited
//! destination re-rates its mirror.

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{
        destination::{CreateDestination, Destination, UpdateDestination, VisitTransition},
        visited_place::NewVisitedPlace,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct DestinationsService {
    repository: Repository,
}

impl DestinationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Destination>> {
        self.repository.destinations.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Destination> {
        self.repository.destinations.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateDestination) -> AppResult<Destination> {
        let destination = self.repository.destinations.create(data).await?;
        tracing::info!("Created destination id={} ({}, {})", destination.id, destination.name, destination.country);
        Ok(destination)
    }

    /// Update plain fields; a changed `is_visited` goes through the toggle rule.
    ///
    /// The mirror is looked up under the name and country it was created
    /// with: a destination leaving the visited state is flipped before a
    /// rename is applied, one entering it after.
    pub async fn update(&self, id: i32, data: &UpdateDestination) -> AppResult<Destination> {
        let mut destination = self.repository.destinations.get_by_id(id).await?;
        let flips = data.is_visited.is_some_and(|v| v != destination.is_visited);

        if flips && destination.is_visited {
            self.flip_visited(&mut destination, None).await?;
            data.apply_to(&mut destination, Utc::now());
        } else {
            data.apply_to(&mut destination, Utc::now());
            if flips {
                self.flip_visited(&mut destination, None).await?;
            }
        }

        self.repository.destinations.update(&destination).await
    }

    /// Delete a destination. Its mirrored visited place, if any, is kept.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.destinations.delete(id).await?;
        tracing::info!("Deleted destination id={}", id);
        Ok(())
    }

    /// Flip the visited flag and create or remove the mirrored visited place
    pub async fn toggle_visited(&self, id: i32, visit_date: Option<&str>) -> AppResult<Destination> {
        let mut destination = self.repository.destinations.get_by_id(id).await?;
        self.flip_visited(&mut destination, visit_date).await?;
        self.repository.destinations.update(&destination).await
    }

    /// Set the rating; a visited destination passes it on to its mirror
    pub async fn update_rating(&self, id: i32, rating: i32) -> AppResult<Destination> {
        let now = Utc::now();
        let mut destination = self.repository.destinations.get_by_id(id).await?;
        destination.set_rating(rating, now);

        if destination.is_visited {
            let places = &self.repository.visited_places;
            match places.find_matching(&destination.name, &destination.country).await? {
                Some(mut place) => {
                    place.rerate(rating, now);
                    places.update(&place).await?;
                    tracing::debug!("Re-rated visited place id={} to {}", place.id, rating);
                }
                None => {
                    tracing::warn!(
                        "Visited destination id={} has no matching visited place ({}, {})",
                        destination.id,
                        destination.name,
                        destination.country
                    );
                }
            }
        }

        self.repository.destinations.update(&destination).await
    }

    /// Toggle `destination` in memory and apply the matching change to the
    /// visited places store. The destination itself is not persisted here.
    async fn flip_visited(&self, destination: &mut Destination, visit_date: Option<&str>) -> AppResult<()> {
        let now = Utc::now();
        let places = &self.repository.visited_places;
        let transition = destination.toggle_visited(visit_date, now);
        let existing = places.find_matching(&destination.name, &destination.country).await?;

        match (transition, existing) {
            (VisitTransition::Visited, None) => {
                let place = places.create(&NewVisitedPlace::mirror_of(destination, now)).await?;
                tracing::info!("Destination id={} visited, created visited place id={}", destination.id, place.id);
            }
            (VisitTransition::Visited, Some(place)) => {
                tracing::debug!("Destination id={} visited, reusing visited place id={}", destination.id, place.id);
            }
            (VisitTransition::Unvisited, Some(place)) => {
                places.delete(place.id).await?;
                tracing::info!("Destination id={} unvisited, removed visited place id={}", destination.id, place.id);
            }
            (VisitTransition::Unvisited, None) => {
                tracing::debug!("Destination id={} unvisited, no visited place to remove", destination.id);
            }
        }
        Ok(())
    }
}
