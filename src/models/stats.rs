//! Travel statistics

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{destination::Destination, visited_place::VisitedPlace};

/// Aggregate travel statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelStats {
    /// Destinations not visited yet
    pub dream_destinations: i64,
    pub visited_places: i64,
    /// Photos across destinations and visited places
    pub shared_photos: i64,
    /// Distinct countries among visited places
    pub explored_countries: i64,
}

impl TravelStats {
    pub fn compute(destinations: &[Destination], places: &[VisitedPlace]) -> Self {
        let countries: HashSet<String> = places
            .iter()
            .map(|p| p.country.trim().to_lowercase())
            .collect();
        let photos = destinations.iter().map(|d| d.photos.len()).sum::<usize>()
            + places.iter().map(|p| p.photos.len()).sum::<usize>();

        Self {
            dream_destinations: destinations.iter().filter(|d| !d.is_visited).count() as i64,
            visited_places: places.len() as i64,
            shared_photos: photos as i64,
            explored_countries: countries.len() as i64,
        }
    }
}
