//! Destination model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::{photo::PhotoInfo, visit_date::parse_visit_date};

/// Destination ranking tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

// SQLx conversion for Priority
impl sqlx::Type<Postgres> for Priority {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Priority {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Priority {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Destination record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub is_visited: bool,
    pub priority: Priority,
    pub date_visited: Option<DateTime<Utc>>,
    /// The user's own words about the place
    pub description: Option<String>,
    /// 1 to 5
    pub rating: Option<i32>,
    #[sqlx(skip)]
    #[serde(default)]
    pub photos: Vec<PhotoInfo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Direction of a visited toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitTransition {
    Visited,
    Unvisited,
}

impl Destination {
    /// Flip the visited flag.
    ///
    /// Becoming visited stamps `date_visited` with `visit_date` (or `now` when
    /// absent or unparsable). Becoming unvisited clears the visit date, the
    /// rating and the description.
    pub fn toggle_visited(&mut self, visit_date: Option<&str>, now: DateTime<Utc>) -> VisitTransition {
        self.is_visited = !self.is_visited;
        self.updated_at = now;
        if self.is_visited {
            self.date_visited = Some(visit_date.and_then(parse_visit_date).unwrap_or(now));
            VisitTransition::Visited
        } else {
            self.date_visited = None;
            self.rating = None;
            self.description = None;
            VisitTransition::Unvisited
        }
    }

    pub fn set_rating(&mut self, rating: i32, now: DateTime<Utc>) {
        self.rating = Some(rating);
        self.updated_at = now;
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value cannot be blank".into());
        return Err(err);
    }
    Ok(())
}

fn valid_priority(value: &str) -> Result<(), ValidationError> {
    value.parse::<Priority>().map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("priority");
        err.message = Some("Priority must be 'high', 'medium' or 'low'".into());
        err
    })
}

fn default_priority() -> String {
    Priority::default().to_string()
}

/// Create destination request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDestination {
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
    /// high, medium or low
    #[serde(default = "default_priority")]
    #[validate(custom(function = "valid_priority"))]
    pub priority: String,
}

impl CreateDestination {
    pub fn priority(&self) -> Priority {
        self.priority.parse().unwrap_or_default()
    }
}

/// Update destination request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDestination {
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
    #[validate(custom(function = "valid_priority"))]
    pub priority: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    /// Changing this runs the visited toggle
    pub is_visited: Option<bool>,
}

impl UpdateDestination {
    /// Apply the plain fields; `is_visited` is left to the caller
    pub fn apply_to(&self, destination: &mut Destination, now: DateTime<Utc>) {
        if let Some(ref name) = self.name {
            destination.name = name.clone();
        }
        if let Some(ref country) = self.country {
            destination.country = country.clone();
        }
        if let Some(priority) = self.priority.as_deref().and_then(|p| p.parse().ok()) {
            destination.priority = priority;
        }
        if let Some(ref description) = self.description {
            destination.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
        }
        destination.updated_at = now;
    }
}

/// Toggle visited request: `{"visitDate": "..."}` or a bare date string
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(from = "ToggleVisitedPayload")]
pub struct ToggleVisited {
    pub visit_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToggleVisitedPayload {
    Bare(Option<String>),
    Wrapped {
        #[serde(rename = "visitDate", alias = "visit_date", alias = "date", default)]
        visit_date: Option<String>,
    },
}

impl From<ToggleVisitedPayload> for ToggleVisited {
    fn from(payload: ToggleVisitedPayload) -> Self {
        match payload {
            ToggleVisitedPayload::Bare(visit_date) => Self { visit_date },
            ToggleVisitedPayload::Wrapped { visit_date } => Self { visit_date },
        }
    }
}

/// Rating request: `{"rating": n}` or a bare integer
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(from = "RatingPayload")]
pub struct UpdateRating {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RatingPayload {
    Bare(i32),
    Wrapped { rating: i32 },
}

impl From<RatingPayload> for UpdateRating {
    fn from(payload: RatingPayload) -> Self {
        match payload {
            RatingPayload::Bare(rating) | RatingPayload::Wrapped { rating } => Self { rating },
        }
    }
}
