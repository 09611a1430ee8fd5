use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::{Bus, BusId, City, Seat};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Bus not found: {0}")]
    BusNotFound(BusId),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only catalog collaborator: cities, timetable search, seat layouts.
/// The engine only ever talks to this trait; the static in-memory
/// implementation lives in `dataset`.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_cities(&self) -> Result<Vec<City>, CatalogError>;

    /// Exact from/to match; the travel date must match the timetable date
    /// unless the route is date-exempt (see `dataset::DATE_EXEMPT_ROUTE`).
    async fn search_buses(
        &self,
        from_city: &str,
        to_city: &str,
        date: NaiveDate,
    ) -> Result<Vec<Bus>, CatalogError>;

    async fn bus_by_id(&self, id: BusId) -> Result<Bus, CatalogError>;

    /// Full seat grid for one bus, generated from its seat count and the
    /// already-sold seat numbers.
    async fn seat_layout(&self, bus_id: BusId) -> Result<Vec<Seat>, CatalogError>;
}
