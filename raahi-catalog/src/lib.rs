pub mod dataset;
pub mod model;
pub mod seatmap;
pub mod service;

pub use dataset::StaticCatalog;
pub use model::{Amenity, Bus, BusId, BusType, City, CityId, Seat};
pub use seatmap::{seat_label, seat_position, SEATS_PER_ROW};
pub use service::{CatalogError, CatalogService};
