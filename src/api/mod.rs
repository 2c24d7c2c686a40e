//! API handlers for the Wanderlust REST endpoints

pub mod destinations;
pub mod health;
pub mod openapi;
pub mod photos;
pub mod stats;
pub mod visited_places;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, DefaultBodyLimit, FromRequest, Request},
    http::{uri::PathAndQuery, Uri},
    routing::{get, patch, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower::{util::MapRequest, Layer};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{error::AppError, AppState};

/// JSON body that has passed `validator` checks
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::BadRequest(e.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Lowercase the request path so routes match regardless of case.
/// The query string is left as sent.
fn lowercase_path(mut req: Request) -> Request {
    let uri = req.uri();
    if !uri.path().bytes().any(|b| b.is_ascii_uppercase()) {
        return req;
    }

    let lowered = match uri.query() {
        Some(query) => format!("{}?{}", uri.path().to_ascii_lowercase(), query),
        None => uri.path().to_ascii_lowercase(),
    };
    let mut parts = uri.clone().into_parts();
    if let Ok(path_and_query) = lowered.parse::<PathAndQuery>() {
        parts.path_and_query = Some(path_and_query);
        if let Ok(uri) = Uri::from_parts(parts) {
            *req.uri_mut() = uri;
        }
    }
    req
}

/// Application service: the router behind the path-lowercasing rewrite
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Routes under `/api`
fn api_routes(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.uploads.max_request_bytes);

    Router::new()
        // Destinations
        .route(
            "/destinations",
            get(destinations::list_destinations).post(destinations::create_destination),
        )
        .route(
            "/destinations/:id",
            get(destinations::get_destination)
                .put(destinations::update_destination)
                .delete(destinations::delete_destination),
        )
        .route("/destinations/:id/toggle-visited", patch(destinations::toggle_visited))
        .route("/destinations/:id/rating", patch(destinations::update_rating))
        .route(
            "/destinations/:id/photos",
            post(destinations::upload_photos).layer(upload_limit.clone()),
        )
        .route(
            "/destinations/:id/photos/:photo_id",
            get(destinations::get_photo).delete(destinations::delete_photo),
        )
        .route("/destinations/:id/photos/:photo_id/thumbnail", get(destinations::get_photo_thumbnail))
        // Visited places
        .route(
            "/visitedplaces",
            get(visited_places::list_visited_places).post(visited_places::create_visited_place),
        )
        .route("/visitedplaces/stats", get(stats::get_stats))
        .route(
            "/visitedplaces/:id",
            get(visited_places::get_visited_place)
                .put(visited_places::update_visited_place)
                .delete(visited_places::delete_visited_place),
        )
        .route("/visitedplaces/:id/rating", patch(visited_places::update_rating))
        .route(
            "/visitedplaces/:id/photos",
            post(visited_places::upload_photos).layer(upload_limit),
        )
        .route(
            "/visitedplaces/:id/photos/:photo_id",
            get(visited_places::get_photo).delete(visited_places::delete_photo),
        )
        .route(
            "/visitedplaces/:id/photos/:photo_id/thumbnail",
            get(visited_places::get_photo_thumbnail),
        )
        .with_state(state)
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes(state))
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Router wrapped so the path is lowercased before routing happens
pub fn create_app(state: AppState) -> App {
    let rewrite: fn(Request) -> Request = lowercase_path;
    tower::util::MapRequestLayer::new(rewrite).layer(create_router(state))
}
