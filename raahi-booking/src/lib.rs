pub mod confirm;
pub mod forms;
pub mod search;
pub mod state;

pub use confirm::{
    BookingRecord, ConfirmError, ConfirmationService, ConfirmationState, Ticket, TicketDesk,
};
pub use forms::{ContactEdit, FormSession, PassengerEdit};
pub use search::{CriteriaErrors, SearchCriteria, SearchForm, SearchState};
pub use state::{BookingState, MissingStep, SeatSelectionError, MAX_SEATS_PER_BOOKING};
