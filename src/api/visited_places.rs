//! Visited place endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use axum_extra::extract::Multipart;

use crate::{
    error::AppResult,
    models::{
        destination::UpdateRating,
        photo::PhotoOwner,
        visited_place::{CreateVisitedPlace, UpdateVisitedPlace, VisitedPlaceResponse},
    },
};

use super::{photos, ValidatedJson};

/// List visited places, most recent visit first
#[utoipa::path(
    get,
    path = "/visitedplaces",
    tag = "visitedplaces",
    responses(
        (status = 200, description = "All visited places", body = Vec<VisitedPlaceResponse>)
    )
)]
pub async fn list_visited_places(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<VisitedPlaceResponse>>> {
    let places = state.services.visited_places.list().await?;
    Ok(Json(places.into_iter().map(Into::into).collect()))
}

/// Get visited place by ID
#[utoipa::path(
    get,
    path = "/visitedplaces/{id}",
    tag = "visitedplaces",
    params(("id" = i32, Path, description = "Visited place ID")),
    responses(
        (status = 200, description = "Visited place details", body = VisitedPlaceResponse),
        (status = 404, description = "Visited place not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_visited_place(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<VisitedPlaceResponse>> {
    let place = state.services.visited_places.get_by_id(id).await?;
    Ok(Json(place.into()))
}

/// Record a visited place
#[utoipa::path(
    post,
    path = "/visitedplaces",
    tag = "visitedplaces",
    request_body = CreateVisitedPlace,
    responses(
        (status = 201, description = "Visited place created", body = VisitedPlaceResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_visited_place(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<CreateVisitedPlace>,
) -> AppResult<(StatusCode, Json<VisitedPlaceResponse>)> {
    let created = state.services.visited_places.create(data).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update a visited place
#[utoipa::path(
    put,
    path = "/visitedplaces/{id}",
    tag = "visitedplaces",
    params(("id" = i32, Path, description = "Visited place ID")),
    request_body = UpdateVisitedPlace,
    responses(
        (status = 200, description = "Visited place updated", body = VisitedPlaceResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Visited place not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_visited_place(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateVisitedPlace>,
) -> AppResult<Json<VisitedPlaceResponse>> {
    let updated = state.services.visited_places.update(id, &data).await?;
    Ok(Json(updated.into()))
}

/// Delete a visited place and its photos
#[utoipa::path(
    delete,
    path = "/visitedplaces/{id}",
    tag = "visitedplaces",
    params(("id" = i32, Path, description = "Visited place ID")),
    responses(
        (status = 204, description = "Visited place deleted"),
        (status = 404, description = "Visited place not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_visited_place(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.visited_places.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rate a visited place
#[utoipa::path(
    patch,
    path = "/visitedplaces/{id}/rating",
    tag = "visitedplaces",
    params(("id" = i32, Path, description = "Visited place ID")),
    request_body = UpdateRating,
    responses(
        (status = 200, description = "Rating updated", body = VisitedPlaceResponse),
        (status = 400, description = "Rating out of range", body = crate::error::ErrorResponse),
        (status = 404, description = "Visited place not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_rating(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateRating>,
) -> AppResult<Json<VisitedPlaceResponse>> {
    let place = state.services.visited_places.update_rating(id, data.rating).await?;
    Ok(Json(place.into()))
}

/// Upload photos (multipart, any file field)
#[utoipa::path(
    post,
    path = "/visitedplaces/{id}/photos",
    tag = "visitedplaces",
    params(("id" = i32, Path, description = "Visited place ID")),
    request_body(content = photos::PhotoUploadForm, content_type = "multipart/form-data", description = "One or more image files"),
    responses(
        (status = 200, description = "Visited place with its photos", body = VisitedPlaceResponse),
        (status = 400, description = "No file, file too large or not an image", body = crate::error::ErrorResponse),
        (status = 404, description = "Visited place not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload_photos(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> AppResult<Json<VisitedPlaceResponse>> {
    let uploads = photos::read_uploads(multipart).await?;
    state.services.photos.upload(PhotoOwner::visited_place(id), uploads).await?;

    let place = state.services.visited_places.get_by_id(id).await?;
    Ok(Json(place.into()))
}

#[utoipa::path(
    get,
    path = "/visitedplaces/{id}/photos/{photo_id}",
    tag = "visitedplaces",
    params(
        ("id" = i32, Path, description = "Visited place ID"),
        ("photo_id" = i32, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Photo not found for this visited place", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_photo(
    State(state): State<crate::AppState>,
    Path((id, photo_id)): Path<(i32, i32)>,
) -> AppResult<Response> {
    let content = state.services.photos.get(PhotoOwner::visited_place(id), photo_id).await?;
    Ok(photos::image_response(content, false))
}

#[utoipa::path(
    get,
    path = "/visitedplaces/{id}/photos/{photo_id}/thumbnail",
    tag = "visitedplaces",
    params(
        ("id" = i32, Path, description = "Visited place ID"),
        ("photo_id" = i32, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Photo not found for this visited place", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_photo_thumbnail(
    State(state): State<crate::AppState>,
    Path((id, photo_id)): Path<(i32, i32)>,
) -> AppResult<Response> {
    let content = state.services.photos.get(PhotoOwner::visited_place(id), photo_id).await?;
    Ok(photos::image_response(content, true))
}

#[utoipa::path(
    delete,
    path = "/visitedplaces/{id}/photos/{photo_id}",
    tag = "visitedplaces",
    params(
        ("id" = i32, Path, description = "Visited place ID"),
        ("photo_id" = i32, Path, description = "Photo ID")
    ),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 404, description = "Photo not found for this visited place", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_photo(
    State(state): State<crate::AppState>,
    Path((id, photo_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    state.services.photos.delete(PhotoOwner::visited_place(id), photo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
