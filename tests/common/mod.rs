//! In-memory stores for exercising services and routes without PostgreSQL

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use wanderlust_server::{
    config::AppConfig,
    error::{AppError, AppResult},
    models::{
        destination::{CreateDestination, Destination},
        photo::{NewPhoto, Photo, PhotoContent, PhotoInfo, PhotoOwner},
        visited_place::{same_place, NewVisitedPlace, VisitedPlace},
    },
    repository::{DestinationStore, PhotoStore, Repository, VisitedPlaceStore},
    services::Services,
    AppState,
};

#[derive(Default)]
struct Tables {
    destinations: Vec<Destination>,
    visited_places: Vec<VisitedPlace>,
    photos: Vec<PhotoContent>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn photo_infos(&self, owner: PhotoOwner) -> Vec<PhotoInfo> {
        self.photos
            .iter()
            .filter(|c| c.photo.owner() == owner)
            .map(|c| PhotoInfo::from(c.photo.clone()))
            .collect()
    }

    fn destination(&self, d: &Destination) -> Destination {
        let mut d = d.clone();
        d.photos = self.photo_infos(PhotoOwner::destination(d.id));
        d
    }

    fn place(&self, p: &VisitedPlace) -> VisitedPlace {
        let mut p = p.clone();
        p.photos = self.photo_infos(PhotoOwner::visited_place(p.id));
        p
    }
}

/// One shared table set implementing every store trait
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn photo_count(&self) -> usize {
        self.tables.lock().unwrap().photos.len()
    }

    pub fn visited_place_count(&self) -> usize {
        self.tables.lock().unwrap().visited_places.len()
    }
}

fn destination_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Destination with id {} not found", id))
}

fn place_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Visited place with id {} not found", id))
}

#[async_trait]
impl DestinationStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Destination>> {
        let t = self.tables.lock().unwrap();
        Ok(t.destinations.iter().map(|d| t.destination(d)).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Destination> {
        let t = self.tables.lock().unwrap();
        t.destinations
            .iter()
            .find(|d| d.id == id)
            .map(|d| t.destination(d))
            .ok_or_else(|| destination_not_found(id))
    }

    async fn create(&self, data: &CreateDestination) -> AppResult<Destination> {
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        let destination = Destination {
            id: t.next_id(),
            name: data.name.trim().to_string(),
            country: data.country.trim().to_string(),
            is_visited: false,
            priority: data.priority(),
            date_visited: None,
            description: None,
            rating: None,
            photos: vec![],
            created_at: now,
            updated_at: now,
        };
        t.destinations.push(destination.clone());
        Ok(destination)
    }

    async fn update(&self, destination: &Destination) -> AppResult<Destination> {
        let mut t = self.tables.lock().unwrap();
        let slot = t
            .destinations
            .iter_mut()
            .find(|d| d.id == destination.id)
            .ok_or_else(|| destination_not_found(destination.id))?;
        *slot = destination.clone();
        Ok(t.destination(destination))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut t = self.tables.lock().unwrap();
        let before = t.destinations.len();
        t.destinations.retain(|d| d.id != id);
        if t.destinations.len() == before {
            return Err(destination_not_found(id));
        }
        t.photos.retain(|c| c.photo.owner() != PhotoOwner::destination(id));
        Ok(())
    }
}

#[async_trait]
impl VisitedPlaceStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<VisitedPlace>> {
        let t = self.tables.lock().unwrap();
        let mut places: Vec<VisitedPlace> = t.visited_places.iter().map(|p| t.place(p)).collect();
        places.sort_by(|a, b| b.visit_date.cmp(&a.visit_date).then(b.id.cmp(&a.id)));
        Ok(places)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<VisitedPlace> {
        let t = self.tables.lock().unwrap();
        t.visited_places
            .iter()
            .find(|p| p.id == id)
            .map(|p| t.place(p))
            .ok_or_else(|| place_not_found(id))
    }

    async fn find_matching(&self, name: &str, country: &str) -> AppResult<Option<VisitedPlace>> {
        let t = self.tables.lock().unwrap();
        Ok(t.visited_places
            .iter()
            .filter(|p| same_place(&p.name, &p.country, name, country))
            .min_by_key(|p| p.id)
            .map(|p| t.place(p)))
    }

    async fn create(&self, data: &NewVisitedPlace) -> AppResult<VisitedPlace> {
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        let place = VisitedPlace {
            id: t.next_id(),
            name: data.name.clone(),
            country: data.country.clone(),
            visit_date: data.visit_date,
            description: data.description.clone(),
            rating: data.rating,
            photos: vec![],
            created_at: now,
            updated_at: now,
        };
        t.visited_places.push(place.clone());
        Ok(place)
    }

    async fn update(&self, place: &VisitedPlace) -> AppResult<VisitedPlace> {
        let mut t = self.tables.lock().unwrap();
        let slot = t
            .visited_places
            .iter_mut()
            .find(|p| p.id == place.id)
            .ok_or_else(|| place_not_found(place.id))?;
        *slot = place.clone();
        Ok(t.place(place))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut t = self.tables.lock().unwrap();
        let before = t.visited_places.len();
        t.visited_places.retain(|p| p.id != id);
        if t.visited_places.len() == before {
            return Err(place_not_found(id));
        }
        t.photos.retain(|c| c.photo.owner() != PhotoOwner::visited_place(id));
        Ok(())
    }
}

#[async_trait]
impl PhotoStore for MemoryStore {
    async fn add(&self, photos: Vec<NewPhoto>) -> AppResult<Vec<Photo>> {
        let mut t = self.tables.lock().unwrap();
        let mut stored = Vec::with_capacity(photos.len());
        for new in photos {
            let photo = Photo {
                id: t.next_id(),
                owner_kind: new.owner.kind,
                owner_id: new.owner.id,
                file_name: new.file_name,
                file_path: new.file_path,
                content_type: new.content_type,
                file_size: new.data.len() as i64,
                caption: None,
                description: None,
                date_taken: None,
                created_at: Utc::now(),
            };
            t.photos.push(PhotoContent {
                photo: photo.clone(),
                image_data: new.data,
            });
            stored.push(photo);
        }
        Ok(stored)
    }

    async fn get_content(&self, photo_id: i32) -> AppResult<Option<PhotoContent>> {
        let t = self.tables.lock().unwrap();
        Ok(t.photos.iter().find(|c| c.photo.id == photo_id).cloned())
    }

    async fn delete(&self, owner: PhotoOwner, photo_id: i32) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.photos.len();
        t.photos
            .retain(|c| !(c.photo.id == photo_id && c.photo.owner() == owner));
        Ok(t.photos.len() != before)
    }
}

/// Services backed by a fresh in-memory store
pub fn services() -> (Arc<MemoryStore>, Services) {
    let store = MemoryStore::new();
    let repository = Repository::from_stores(store.clone(), store.clone(), store.clone());
    let services = Services::new(repository, AppConfig::default().uploads);
    (store, services)
}

/// Application state backed by a fresh in-memory store
pub fn app_state() -> (Arc<MemoryStore>, AppState) {
    let (store, services) = services();
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(services),
    };
    (store, state)
}
