//! API integration tests against a running server and database

use reqwest::{multipart, Client};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Helper creating a destination and returning its id
async fn create_destination(client: &Client, name: &str, country: &str) -> i64 {
    let response = client
        .post(format!("{}/api/destinations", BASE_URL))
        .json(&json!({
            "name": name,
            "country": country,
            "priority": "high"
        }))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse destination");
    body["id"].as_i64().expect("No id in response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_toggle_creates_and_removes_visited_place() {
    let client = Client::new();
    let id = create_destination(&client, "Valletta", "Malta").await;

    let response = client
        .patch(format!("{}/api/destinations/{}/toggle-visited", BASE_URL, id))
        .json(&json!({"visitDate": "2024-03-01"}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let places: Value = client
        .get(format!("{}/api/visitedplaces", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let mirror = places
        .as_array()
        .expect("Expected an array")
        .iter()
        .find(|p| p["name"] == "Valletta")
        .expect("No visited place created");
    assert_eq!(mirror["description"], "We visited Valletta!");
    assert_eq!(mirror["date"], "2024-03-01");

    let response = client
        .patch(format!("{}/api/destinations/{}/toggle-visited", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["isVisited"], false);

    let response = client
        .delete(format!("{}/api/destinations/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_rating_out_of_range() {
    let client = Client::new();
    let id = create_destination(&client, "Porto", "Portugal").await;

    let response = client
        .patch(format!("{}/api/destinations/{}/rating", BASE_URL, id))
        .json(&json!({"rating": 0}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    client
        .delete(format!("{}/api/destinations/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
}

#[tokio::test]
#[ignore]
async fn test_photo_upload_and_download() {
    let client = Client::new();
    let id = create_destination(&client, "Bruges", "Belgium").await;

    let part = multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
        .file_name("canal.jpg")
        .mime_str("image/jpeg")
        .expect("Invalid mime type");
    let form = multipart::Form::new().part("files", part);

    let response = client
        .post(format!("{}/api/destinations/{}/photos", BASE_URL, id))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let url = body["photos"][0]["url"].as_str().expect("No photo url").to_string();

    let response = client
        .get(format!("{}{}", BASE_URL, url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.headers()["content-type"], "image/jpeg");
    let bytes = response.bytes().await.expect("Failed to read image");
    assert_eq!(bytes.len(), 4);

    client
        .delete(format!("{}/api/destinations/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/visitedplaces/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["dreamDestinations"].is_number());
    assert!(body["exploredCountries"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_unknown_destination() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/destinations/2147483647", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
