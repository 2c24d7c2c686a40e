//! Photo model
//!
//! Destinations and visited places share one photo table; a photo records
//! which kind of record owns it and that record's id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Content types accepted for uploads
pub const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Kind of record owning a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    Destination,
    VisitedPlace,
}

impl OwnerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::Destination => "destination",
            OwnerKind::VisitedPlace => "visited_place",
        }
    }

    /// Route segment of the owner collection
    pub fn route(&self) -> &'static str {
        match self {
            OwnerKind::Destination => "destinations",
            OwnerKind::VisitedPlace => "visitedplaces",
        }
    }

    /// Human readable label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            OwnerKind::Destination => "destination",
            OwnerKind::VisitedPlace => "visited place",
        }
    }
}

impl std::str::FromStr for OwnerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "destination" => Ok(OwnerKind::Destination),
            "visited_place" => Ok(OwnerKind::VisitedPlace),
            _ => Err(format!("Invalid photo owner kind: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for OwnerKind {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for OwnerKind {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for OwnerKind {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Record owning a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhotoOwner {
    pub kind: OwnerKind,
    pub id: i32,
}

impl PhotoOwner {
    pub fn destination(id: i32) -> Self {
        Self { kind: OwnerKind::Destination, id }
    }

    pub fn visited_place(id: i32) -> Self {
        Self { kind: OwnerKind::VisitedPlace, id }
    }
}

impl std::fmt::Display for PhotoOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.label(), self.id)
    }
}

/// Photo metadata (image bytes are loaded separately)
#[derive(Debug, Clone, FromRow)]
pub struct Photo {
    pub id: i32,
    pub owner_kind: OwnerKind,
    pub owner_id: i32,
    pub file_name: String,
    pub file_path: String,
    pub content_type: String,
    pub file_size: i64,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub date_taken: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Photo {
    pub fn owner(&self) -> PhotoOwner {
        PhotoOwner {
            kind: self.owner_kind,
            id: self.owner_id,
        }
    }
}

/// Photo with its image bytes
#[derive(Debug, Clone, FromRow)]
pub struct PhotoContent {
    #[sqlx(flatten)]
    pub photo: Photo,
    pub image_data: Vec<u8>,
}

/// Photo as exposed in owner projections
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoInfo {
    pub id: i32,
    pub file_name: String,
    pub file_path: String,
    /// Where the image bytes are served
    pub url: String,
    pub thumbnail_url: String,
    pub content_type: String,
    pub file_size: i64,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub date_taken: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Photo> for PhotoInfo {
    fn from(photo: Photo) -> Self {
        let url = format!(
            "/api/{}/{}/photos/{}",
            photo.owner_kind.route(),
            photo.owner_id,
            photo.id
        );
        Self {
            id: photo.id,
            thumbnail_url: format!("{}/thumbnail", url),
            url,
            file_name: photo.file_name,
            file_path: photo.file_path,
            content_type: photo.content_type,
            file_size: photo.file_size,
            caption: photo.caption,
            description: photo.description,
            date_taken: photo.date_taken,
            created_at: photo.created_at,
        }
    }
}

/// One uploaded file, as received
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl PhotoUpload {
    /// Reject files over `max_bytes` or with a non-image content type
    pub fn check(&self, max_bytes: usize) -> AppResult<()> {
        if self.data.len() > max_bytes {
            return Err(AppError::Validation(format!(
                "Photo {} is too large. Maximum size is {}MB.",
                self.file_name,
                max_bytes / (1024 * 1024)
            )));
        }
        let content_type = self.content_type.to_lowercase();
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(AppError::Validation(format!(
                "Photo {} has invalid format. Only JPEG, PNG, GIF and WebP are allowed.",
                self.file_name
            )));
        }
        Ok(())
    }

    /// Extension for the stored file, taken from the accepted content type.
    /// The client's file name is not trusted.
    fn extension(&self) -> &'static str {
        match self.content_type.to_lowercase().as_str() {
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }

    /// Row to insert, under a freshly generated unique file name
    pub fn into_new_photo(self, owner: PhotoOwner) -> NewPhoto {
        let file_name = format!("{}.{}", Uuid::new_v4(), self.extension());
        NewPhoto {
            owner,
            file_path: format!("{}/{}/{}", owner.kind.route(), owner.id, file_name),
            file_name,
            content_type: self.content_type.to_lowercase(),
            data: self.data,
        }
    }
}

/// Photo row about to be stored
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub owner: PhotoOwner,
    pub file_name: String,
    pub file_path: String,
    pub content_type: String,
    pub data: Vec<u8>,
}
