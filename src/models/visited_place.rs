//! Visited place model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    description::Description,
    destination::{not_blank, Destination},
    photo::PhotoInfo,
    visit_date::{parse_visit_date, validate_visit_date},
};
use crate::error::{AppError, AppResult};

pub const DEFAULT_RATING: i32 = 5;

/// Whether two (name, country) pairs designate the same place.
///
/// Names compare case-insensitively; countries also ignore surrounding
/// whitespace. Destinations find their mirrored visited place this way.
pub fn same_place(name: &str, country: &str, other_name: &str, other_country: &str) -> bool {
    name.to_lowercase() == other_name.to_lowercase()
        && country.trim().to_lowercase() == other_country.trim().to_lowercase()
}

/// Visited place record
#[derive(Debug, Clone, FromRow)]
pub struct VisitedPlace {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub visit_date: DateTime<Utc>,
    #[sqlx(flatten)]
    pub description: Description,
    pub rating: i32,
    #[sqlx(skip)]
    pub photos: Vec<PhotoInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VisitedPlace {
    pub fn matches(&self, name: &str, country: &str) -> bool {
        same_place(&self.name, &self.country, name, country)
    }

    /// Rating pushed from the mirrored destination: the sentence always
    /// follows the new rating, the user's comment is kept.
    pub fn rerate(&mut self, rating: i32, now: DateTime<Utc>) {
        self.rating = rating;
        self.description = self.description.rerated(rating);
        self.updated_at = now;
    }

    /// Rating set on the place itself: a generated sentence follows the new
    /// rating, a purely free-text description is left alone.
    pub fn set_rating(&mut self, rating: i32, now: DateTime<Utc>) {
        if self.description.template.is_some() {
            self.rerate(rating, now);
        } else {
            self.rating = rating;
            self.updated_at = now;
        }
    }
}

/// Visited place as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitedPlaceResponse {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub visit_date: DateTime<Utc>,
    /// Visit date as `YYYY-MM-DD`
    pub date: String,
    /// Rendered description
    pub description: String,
    /// The user's own words, without the generated sentence
    pub comment: Option<String>,
    pub rating: i32,
    pub photos: Vec<PhotoInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VisitedPlace> for VisitedPlaceResponse {
    fn from(place: VisitedPlace) -> Self {
        Self {
            description: place.description.render(&place.name),
            comment: place.description.comment.clone(),
            date: place.visit_date.format("%Y-%m-%d").to_string(),
            id: place.id,
            name: place.name,
            country: place.country,
            visit_date: place.visit_date,
            rating: place.rating,
            photos: place.photos,
            created_at: place.created_at,
            updated_at: place.updated_at,
        }
    }
}

/// Visited place row about to be stored
#[derive(Debug, Clone)]
pub struct NewVisitedPlace {
    pub name: String,
    pub country: String,
    pub visit_date: DateTime<Utc>,
    pub description: Description,
    pub rating: i32,
}

impl NewVisitedPlace {
    /// Visited place mirroring a destination that just became visited
    pub fn mirror_of(destination: &Destination, now: DateTime<Utc>) -> Self {
        Self {
            name: destination.name.clone(),
            country: destination.country.clone(),
            visit_date: destination.date_visited.unwrap_or(now),
            description: Description::generated(destination.rating, destination.description.clone()),
            rating: destination.rating.unwrap_or(DEFAULT_RATING),
        }
    }
}

fn default_rating() -> i32 {
    DEFAULT_RATING
}

/// Create visited place request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitedPlace {
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(
        length(min = 1, max = 100, message = "Country must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub country: String,
    /// Date of the visit; `date` is accepted as an alias
    #[serde(alias = "date")]
    #[validate(custom(function = "validate_visit_date"))]
    pub visit_date: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,
    #[serde(default = "default_rating")]
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

impl CreateVisitedPlace {
    /// Convert a validated request into a row
    pub fn into_new(self) -> AppResult<NewVisitedPlace> {
        let visit_date = parse_visit_date(&self.visit_date)
            .ok_or_else(|| AppError::Validation("Visit date is not a valid date".to_string()))?;
        let name = self.name.trim().to_string();
        Ok(NewVisitedPlace {
            description: Description::parse(&name, &self.description),
            name,
            country: self.country.trim().to_string(),
            visit_date,
            rating: self.rating,
        })
    }
}

/// Update visited place request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVisitedPlace {
    #[validate(
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    #[validate(
        length(min = 1, max = 100, message = "Country must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub country: Option<String>,
    #[serde(alias = "date")]
    #[validate(custom(function = "validate_visit_date"))]
    pub visit_date: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
}

impl UpdateVisitedPlace {
    pub fn apply_to(&self, place: &mut VisitedPlace, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(ref name) = self.name {
            place.name = name.clone();
        }
        if let Some(ref country) = self.country {
            place.country = country.clone();
        }
        if let Some(ref raw) = self.visit_date {
            place.visit_date = parse_visit_date(raw)
                .ok_or_else(|| AppError::Validation("Visit date is not a valid date".to_string()))?;
        }
        if let Some(ref text) = self.description {
            place.description = Description::parse(&place.name, text);
        }
        if let Some(rating) = self.rating {
            place.rating = rating;
        }
        place.updated_at = now;
        Ok(())
    }
}
