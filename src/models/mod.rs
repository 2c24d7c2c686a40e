//! Data models for Wanderlust

pub mod description;
pub mod destination;
pub mod photo;
pub mod stats;
pub mod visit_date;
pub mod visited_place;

// Re-export commonly used types
pub use description::{Description, DescriptionTemplate};
pub use destination::{Destination, Priority, VisitTransition};
pub use photo::{Photo, PhotoContent, PhotoInfo, PhotoOwner, PhotoUpload};
pub use stats::TravelStats;
pub use visited_place::{NewVisitedPlace, VisitedPlace, VisitedPlaceResponse};
