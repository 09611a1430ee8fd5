use raahi_booking::{ConfirmError, CriteriaErrors, SeatSelectionError};
use raahi_catalog::CatalogError;

use crate::controller::Screen;

/// Everything a flow handler can surface. All of it is recoverable: retry
/// the fetch, fix the highlighted field, or follow the redirect. Nothing
/// here is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Failed to load travel data. Please try again.")]
    Catalog(#[from] CatalogError),

    #[error("Please fix the highlighted search fields")]
    InvalidSearch(CriteriaErrors),

    #[error(transparent)]
    SeatSelection(#[from] SeatSelectionError),

    #[error("Seat {0} is not part of this bus layout")]
    UnknownSeat(u32),

    #[error("Please complete the highlighted passenger and contact fields")]
    InvalidDetails,

    #[error("Please complete all booking steps before reviewing.")]
    PreconditionNotMet { redirect: Screen },

    #[error("Failed to confirm booking. Please try again.")]
    Confirmation(#[from] ConfirmError),
}
