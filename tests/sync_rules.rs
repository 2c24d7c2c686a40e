//! Destination / visited place synchronization, end to end over the services

mod common;

use wanderlust_server::{
    error::AppError,
    models::{
        destination::{CreateDestination, UpdateDestination},
        photo::{PhotoOwner, PhotoUpload},
        visited_place::{CreateVisitedPlace, VisitedPlaceResponse},
    },
};

fn create(name: &str, country: &str, priority: &str) -> CreateDestination {
    CreateDestination {
        name: name.to_string(),
        country: country.to_string(),
        priority: priority.to_string(),
    }
}

fn jpeg(len: usize) -> PhotoUpload {
    PhotoUpload {
        file_name: "shot.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        data: vec![0xFF; len],
    }
}

#[tokio::test]
async fn test_rome_toggle_creates_visited_place() {
    let (_, services) = common::services();
    let rome = services.destinations.create(&create("Rome", "Italy", "high")).await.unwrap();

    let toggled = services
        .destinations
        .toggle_visited(rome.id, Some("2024-03-01"))
        .await
        .unwrap();
    assert!(toggled.is_visited);
    assert_eq!(
        toggled.date_visited.map(|d| d.format("%Y-%m-%d").to_string()),
        Some("2024-03-01".to_string())
    );

    let places = services.visited_places.list().await.unwrap();
    assert_eq!(places.len(), 1);
    let place = VisitedPlaceResponse::from(places[0].clone());
    assert_eq!((place.name.as_str(), place.country.as_str()), ("Rome", "Italy"));
    assert_eq!(place.rating, 5);
    assert_eq!(place.description, "We visited Rome!");
    assert_eq!(place.date, "2024-03-01");
}

#[tokio::test]
async fn test_toggle_twice_restores_state() {
    let (store, services) = common::services();
    let rome = services.destinations.create(&create("Rome", "Italy", "medium")).await.unwrap();

    services.destinations.toggle_visited(rome.id, None).await.unwrap();
    services.destinations.update_rating(rome.id, 4).await.unwrap();
    assert_eq!(store.visited_place_count(), 1);

    let back = services.destinations.toggle_visited(rome.id, None).await.unwrap();
    assert!(!back.is_visited);
    assert_eq!(back.rating, None);
    assert_eq!(back.description, None);
    assert_eq!(back.date_visited, None);
    assert_eq!(store.visited_place_count(), 0);
}

#[tokio::test]
async fn test_rename_and_unvisit_in_one_update() {
    let (store, services) = common::services();
    let rome = services.destinations.create(&create("Rome", "Italy", "high")).await.unwrap();
    services.destinations.toggle_visited(rome.id, None).await.unwrap();
    assert_eq!(store.visited_place_count(), 1);

    let update = UpdateDestination {
        name: Some("Roma".to_string()),
        is_visited: Some(false),
        ..Default::default()
    };
    let updated = services.destinations.update(rome.id, &update).await.unwrap();
    assert_eq!(updated.name, "Roma");
    assert!(!updated.is_visited);
    assert_eq!(store.visited_place_count(), 0);

    // Visiting again mirrors under the new name
    let update = UpdateDestination {
        is_visited: Some(true),
        ..Default::default()
    };
    services.destinations.update(rome.id, &update).await.unwrap();
    let places = services.visited_places.list().await.unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "Roma");
}

#[tokio::test]
async fn test_rating_five_after_toggle() {
    let (_, services) = common::services();
    let kyoto = services.destinations.create(&create("Kyoto", "Japan", "high")).await.unwrap();
    services.destinations.toggle_visited(kyoto.id, None).await.unwrap();
    services.destinations.update_rating(kyoto.id, 5).await.unwrap();

    let place = services.visited_places.list().await.unwrap().remove(0);
    assert_eq!(place.rating, 5);
    assert_eq!(
        VisitedPlaceResponse::from(place).description,
        "An incredible, unforgettable experience at Kyoto!"
    );
}

#[tokio::test]
async fn test_rerating_keeps_comment() {
    let (_, services) = common::services();
    let lisbon = services.destinations.create(&create("Lisbon", "Portugal", "low")).await.unwrap();
    services
        .destinations
        .update(
            lisbon.id,
            &UpdateDestination {
                description: Some("Pastéis de nata everywhere".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    services.destinations.toggle_visited(lisbon.id, None).await.unwrap();

    services.destinations.update_rating(lisbon.id, 3).await.unwrap();
    services.destinations.update_rating(lisbon.id, 4).await.unwrap();

    let place = services.visited_places.list().await.unwrap().remove(0);
    assert_eq!(
        VisitedPlaceResponse::from(place).description,
        "A very good experience at Lisbon! Pastéis de nata everywhere"
    );
}

#[tokio::test]
async fn test_toggle_matches_existing_place_case_insensitively() {
    let (store, services) = common::services();
    let request: CreateVisitedPlace = serde_json::from_str(
        r#"{"name":"rome","country":" ITALY ","visitDate":"2023-09-10","description":"Second trip"}"#,
    )
    .unwrap();
    services.visited_places.create(request).await.unwrap();

    let rome = services.destinations.create(&create("Rome", "Italy", "high")).await.unwrap();
    services.destinations.toggle_visited(rome.id, None).await.unwrap();
    assert_eq!(store.visited_place_count(), 1);

    services.destinations.toggle_visited(rome.id, None).await.unwrap();
    assert_eq!(store.visited_place_count(), 0);
}

#[tokio::test]
async fn test_oversized_photo_writes_nothing() {
    let (store, services) = common::services();
    let paris = services.destinations.create(&create("Paris", "France", "high")).await.unwrap();

    let result = services
        .photos
        .upload(
            PhotoOwner::destination(paris.id),
            vec![jpeg(1024), jpeg(10 * 1024 * 1024 + 1)],
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(store.photo_count(), 0);
}

#[tokio::test]
async fn test_photo_belongs_to_its_owner() {
    let (store, services) = common::services();
    let paris = services.destinations.create(&create("Paris", "France", "high")).await.unwrap();
    let nice = services.destinations.create(&create("Nice", "France", "low")).await.unwrap();

    let stored = services
        .photos
        .upload(PhotoOwner::destination(paris.id), vec![jpeg(16)])
        .await
        .unwrap();
    let photo_id = stored[0].id;

    let content = services.photos.get(PhotoOwner::destination(paris.id), photo_id).await.unwrap();
    assert_eq!(content.image_data.len(), 16);

    let wrong_owner = services.photos.get(PhotoOwner::destination(nice.id), photo_id).await;
    assert!(matches!(wrong_owner, Err(AppError::NotFound(_))));

    services.destinations.delete(paris.id).await.unwrap();
    assert_eq!(store.photo_count(), 0);
}

#[tokio::test]
async fn test_stats_scenario() {
    let (_, services) = common::services();
    let a = services.destinations.create(&create("Paris", "France", "high")).await.unwrap();
    let b = services.destinations.create(&create("New York", "USA", "medium")).await.unwrap();
    let c = services.destinations.create(&create("Reykjavik", "Iceland", "low")).await.unwrap();
    services.destinations.toggle_visited(a.id, None).await.unwrap();
    services.destinations.toggle_visited(b.id, None).await.unwrap();

    let places = services.visited_places.list().await.unwrap();
    assert_eq!(places.len(), 2);

    services
        .photos
        .upload(PhotoOwner::destination(c.id), vec![jpeg(8), jpeg(8)])
        .await
        .unwrap();
    services
        .photos
        .upload(PhotoOwner::visited_place(places[0].id), vec![jpeg(8), jpeg(8), jpeg(8)])
        .await
        .unwrap();

    let stats = services.stats.travel_stats().await.unwrap();
    assert_eq!(stats.dream_destinations, 1);
    assert_eq!(stats.visited_places, 2);
    assert_eq!(stats.shared_photos, 5);
    assert_eq!(stats.explored_countries, 2);
}
