//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{destinations, health, photos, stats, visited_places};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wanderlust Memoir API",
        version = "1.0.0",
        description = "Travel memoir REST API: dream destinations, visited places, photos and statistics"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Destinations
        destinations::list_destinations,
        destinations::get_destination,
        destinations::create_destination,
        destinations::update_destination,
        destinations::delete_destination,
        destinations::toggle_visited,
        destinations::update_rating,
        destinations::upload_photos,
        destinations::get_photo,
        destinations::get_photo_thumbnail,
        destinations::delete_photo,
        // Visited places
        visited_places::list_visited_places,
        visited_places::get_visited_place,
        visited_places::create_visited_place,
        visited_places::update_visited_place,
        visited_places::delete_visited_place,
        visited_places::update_rating,
        visited_places::upload_photos,
        visited_places::get_photo,
        visited_places::get_photo_thumbnail,
        visited_places::delete_photo,
        // Stats
        stats::get_stats,
        // Health (served at the root, outside /api)
        health::health_check,
    ),
    components(
        schemas(
            // Destinations
            crate::models::destination::Destination,
            crate::models::destination::Priority,
            crate::models::destination::CreateDestination,
            crate::models::destination::UpdateDestination,
            crate::models::destination::ToggleVisited,
            crate::models::destination::UpdateRating,
            // Visited places
            crate::models::visited_place::VisitedPlaceResponse,
            crate::models::visited_place::CreateVisitedPlace,
            crate::models::visited_place::UpdateVisitedPlace,
            // Photos
            crate::models::photo::PhotoInfo,
            photos::PhotoUploadForm,
            // Stats
            crate::models::stats::TravelStats,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "destinations", description = "Dream destinations and their visited toggle"),
        (name = "visitedplaces", description = "Visited places log"),
        (name = "stats", description = "Statistics"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
