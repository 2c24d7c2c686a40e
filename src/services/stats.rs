//! Statistics service

use crate::{error::AppResult, models::stats::TravelStats, repository::Repository};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Dashboard counters computed over current destinations and visited places
    pub async fn travel_stats(&self) -> AppResult<TravelStats> {
        let (destinations, places) = tokio::try_join!(
            self.repository.destinations.list(),
            self.repository.visited_places.list(),
        )?;
        Ok(TravelStats::compute(&destinations, &places))
    }
}
