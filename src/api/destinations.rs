//! Destination endpoints

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use axum_extra::extract::Multipart;

use crate::{
    error::{AppError, AppResult},
    models::{
        destination::{CreateDestination, Destination, ToggleVisited, UpdateDestination, UpdateRating},
        photo::PhotoOwner,
    },
};

use super::{photos, ValidatedJson};

/// List all destinations
#[utoipa::path(
    get,
    path = "/destinations",
    tag = "destinations",
    responses(
        (status = 200, description = "All destinations", body = Vec<Destination>)
    )
)]
pub async fn list_destinations(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Destination>>> {
    let destinations = state.services.destinations.list().await?;
    Ok(Json(destinations))
}

/// Get destination by ID
#[utoipa::path(
    get,
    path = "/destinations/{id}",
    tag = "destinations",
    params(("id" = i32, Path, description = "Destination ID")),
    responses(
        (status = 200, description = "Destination details", body = Destination),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_destination(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Destination>> {
    let destination = state.services.destinations.get_by_id(id).await?;
    Ok(Json(destination))
}

/// Create a new destination
#[utoipa::path(
    post,
    path = "/destinations",
    tag = "destinations",
    request_body = CreateDestination,
    responses(
        (status = 201, description = "Destination created", body = Destination),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_destination(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<CreateDestination>,
) -> AppResult<(StatusCode, Json<Destination>)> {
    let created = state.services.destinations.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a destination
#[utoipa::path(
    put,
    path = "/destinations/{id}",
    tag = "destinations",
    params(("id" = i32, Path, description = "Destination ID")),
    request_body = UpdateDestination,
    responses(
        (status = 200, description = "Destination updated", body = Destination),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_destination(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateDestination>,
) -> AppResult<Json<Destination>> {
    let updated = state.services.destinations.update(id, &data).await?;
    Ok(Json(updated))
}

/// Delete a destination and its photos
#[utoipa::path(
    delete,
    path = "/destinations/{id}",
    tag = "destinations",
    params(("id" = i32, Path, description = "Destination ID")),
    responses(
        (status = 204, description = "Destination deleted"),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_destination(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.destinations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle the visited flag.
///
/// The body is optional: `{"visitDate": "2024-03-01"}` or a bare JSON string.
/// Becoming visited creates the matching visited place, becoming unvisited
/// removes it.
#[utoipa::path(
    patch,
    path = "/destinations/{id}/toggle-visited",
    tag = "destinations",
    params(("id" = i32, Path, description = "Destination ID")),
    request_body(content = ToggleVisited, description = "Optional visit date"),
    responses(
        (status = 200, description = "Destination toggled", body = Destination),
        (status = 400, description = "Malformed body", body = crate::error::ErrorResponse),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn toggle_visited(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    body: Bytes,
) -> AppResult<Json<Destination>> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ToggleVisited::default()
    } else {
        serde_json::from_slice::<ToggleVisited>(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid toggle body: {}", e)))?
    };

    let destination = state
        .services
        .destinations
        .toggle_visited(id, request.visit_date.as_deref())
        .await?;
    Ok(Json(destination))
}

/// Rate a destination; a visited destination passes the rating on to its
/// visited place
#[utoipa::path(
    patch,
    path = "/destinations/{id}/rating",
    tag = "destinations",
    params(("id" = i32, Path, description = "Destination ID")),
    request_body = UpdateRating,
    responses(
        (status = 200, description = "Rating updated", body = Destination),
        (status = 400, description = "Rating out of range", body = crate::error::ErrorResponse),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_rating(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateRating>,
) -> AppResult<Json<Destination>> {
    let destination = state.services.destinations.update_rating(id, data.rating).await?;
    Ok(Json(destination))
}

/// Upload photos (multipart, any file field)
#[utoipa::path(
    post,
    path = "/destinations/{id}/photos",
    tag = "destinations",
    params(("id" = i32, Path, description = "Destination ID")),
    request_body(content = photos::PhotoUploadForm, content_type = "multipart/form-data", description = "One or more image files"),
    responses(
        (status = 200, description = "Destination with its photos", body = Destination),
        (status = 400, description = "No file, file too large or not an image", body = crate::error::ErrorResponse),
        (status = 404, description = "Destination not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload_photos(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<Destination>> {
    let uploads = photos::read_uploads(multipart).await?;
    state.services.photos.upload(PhotoOwner::destination(id), uploads).await?;

    let destination = state.services.destinations.get_by_id(id).await?;
    Ok(Json(destination))
}

/// Get the image bytes of a photo
#[utoipa::path(
    get,
    path = "/destinations/{id}/photos/{photo_id}",
    tag = "destinations",
    params(
        ("id" = i32, Path, description = "Destination ID"),
        ("photo_id" = i32, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Photo not found for this destination", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_photo(
    State(state): State<crate::AppState>,
    Path((id, photo_id)): Path<(i32, i32)>,
) -> AppResult<Response> {
    let content = state.services.photos.get(PhotoOwner::destination(id), photo_id).await?;
    Ok(photos::image_response(content, false))
}

/// Get the thumbnail of a photo (same bytes as the original)
#[utoipa::path(
    get,
    path = "/destinations/{id}/photos/{photo_id}/thumbnail",
    tag = "destinations",
    params(
        ("id" = i32, Path, description = "Destination ID"),
        ("photo_id" = i32, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Photo not found for this destination", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_photo_thumbnail(
    State(state): State<crate::AppState>,
    Path((id, photo_id)): Path<(i32, i32)>,
) -> AppResult<Response> {
    let content = state.services.photos.get(PhotoOwner::destination(id), photo_id).await?;
    Ok(photos::image_response(content, true))
}

/// Delete one photo of a destination
#[utoipa::path(
    delete,
    path = "/destinations/{id}/photos/{photo_id}",
    tag = "destinations",
    params(
        ("id" = i32, Path, description = "Destination ID"),
        ("photo_id" = i32, Path, description = "Photo ID")
    ),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 404, description = "Photo not found for this destination", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_photo(
    State(state): State<crate::AppState>,
    Path((id, photo_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    state.services.photos.delete(PhotoOwner::destination(id), photo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
