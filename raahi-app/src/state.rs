use std::sync::Arc;

use raahi_booking::{ConfirmationService, TicketDesk};
use raahi_catalog::{CatalogService, StaticCatalog};

/// Handles to the external collaborators the flow talks to.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogService>,
    pub tickets: Arc<dyn ConfirmationService>,
}

impl AppState {
    /// The standard wiring: static catalog plus in-memory ticket desk.
    pub fn in_memory() -> Self {
        Self {
            catalog: Arc::new(StaticCatalog::new()),
            tickets: Arc::new(TicketDesk::new()),
        }
    }
}
