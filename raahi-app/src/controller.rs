use serde::Serialize;
use tracing::{debug, info, warn};

use raahi_booking::{
    BookingState, ContactEdit, FormSession, MissingStep, PassengerEdit, SearchCriteria,
    SearchForm, SearchState, Ticket,
};
use raahi_catalog::{BusId, City, Seat};

use crate::error::FlowError;
use crate::state::AppState;

/// The screens of the booking flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    Search,
    Results,
    SeatSelection,
    PassengerDetails,
    Review,
    Ticket,
}

/// Top-level controller. Owns the collaborators and every piece of mutable
/// flow state, and is the only thing that mutates it: each handler runs to
/// completion on the single event loop, so mutations never interleave.
pub struct BookingFlow {
    state: AppState,
    screen: Screen,
    pub search: SearchState,
    pub booking: BookingState,
    pub forms: FormSession,
    seat_map: Vec<Seat>,
}

impl BookingFlow {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            screen: Screen::Search,
            search: SearchState::default(),
            booking: BookingState::new(),
            forms: FormSession::default(),
            seat_map: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Seat grid of the bus currently being picked from.
    pub fn seat_map(&self) -> &[Seat] {
        &self.seat_map
    }

    /// City list for the search form dropdowns.
    pub async fn load_cities(&self) -> Result<Vec<City>, FlowError> {
        Ok(self.state.catalog.list_cities().await?)
    }

    /// Validate the form and run the catalog search. A submit while a search
    /// is already in flight is dropped.
    pub async fn submit_search(&mut self, form: SearchForm) -> Result<(), FlowError> {
        let criteria = form.validate().map_err(FlowError::InvalidSearch)?;
        if !self.search.begin(criteria.clone()) {
            debug!("Search already in flight, ignoring submit");
            return Ok(());
        }
        self.run_search(criteria).await
    }

    /// Re-run a failed search with the same criteria.
    pub async fn retry_search(&mut self) -> Result<(), FlowError> {
        let Some(criteria) = self.search.retryable_criteria() else {
            debug!("No failed search to retry");
            return Ok(());
        };
        if !self.search.begin(criteria.clone()) {
            return Ok(());
        }
        self.run_search(criteria).await
    }

    async fn run_search(&mut self, criteria: SearchCriteria) -> Result<(), FlowError> {
        info!(
            from = %criteria.from_city,
            to = %criteria.to_city,
            date = %criteria.date,
            "Searching buses"
        );

        match self
            .state
            .catalog
            .search_buses(&criteria.from_city, &criteria.to_city, criteria.date)
            .await
        {
            Ok(buses) => {
                info!(count = buses.len(), "Search finished");
                self.search.resolve(buses);
                self.screen = Screen::Results;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Search failed");
                self.search.reject(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Load a bus and its seat grid, and move to seat picking.
    pub async fn open_seat_selection(&mut self, bus_id: BusId) -> Result<(), FlowError> {
        let bus = self.state.catalog.bus_by_id(bus_id).await?;
        let layout = self.state.catalog.seat_layout(bus_id).await?;

        info!(bus_id, name = %bus.name, "Opening seat selection");
        self.booking.choose_bus(bus);
        self.seat_map = layout;
        self.screen = Screen::SeatSelection;
        Ok(())
    }

    pub fn select_seat(&mut self, seat_number: u32) -> Result<(), FlowError> {
        let seat = self
            .seat_map
            .iter()
            .find(|seat| seat.seat_number == seat_number)
            .cloned()
            .ok_or(FlowError::UnknownSeat(seat_number))?;

        self.booking.select_seat(seat)?;
        Ok(())
    }

    pub fn deselect_seat(&mut self, seat_number: u32) {
        self.booking.deselect_seat(seat_number);
    }

    /// Move to the passenger-details screen, one form per selected seat.
    pub fn open_passenger_details(&mut self) -> Result<(), FlowError> {
        if self.booking.selected_seats().is_empty() {
            self.screen = Screen::SeatSelection;
            return Err(FlowError::PreconditionNotMet {
                redirect: Screen::SeatSelection,
            });
        }

        self.forms = FormSession::for_selection(
            self.booking.selected_seats().len(),
            self.booking.passengers(),
            self.booking.contact(),
        );
        self.screen = Screen::PassengerDetails;
        Ok(())
    }

    pub fn edit_passenger(&mut self, index: usize, edit: PassengerEdit) {
        self.forms.edit_passenger(index, edit);
    }

    pub fn edit_contact(&mut self, edit: ContactEdit) {
        self.forms.edit_contact(edit);
    }

    /// Validate every form; on success copy the drafts into the booking and
    /// move to review. Field errors stay on the session for the screen to
    /// show.
    pub fn submit_passenger_details(&mut self) -> Result<(), FlowError> {
        if !self.forms.validate() {
            return Err(FlowError::InvalidDetails);
        }

        self.booking.set_passengers(self.forms.passengers().to_vec());
        self.booking.set_contact(self.forms.contact().clone());
        self.open_review()
    }

    /// Review is only reachable with a complete booking; otherwise redirect
    /// to the earliest incomplete screen.
    pub fn open_review(&mut self) -> Result<(), FlowError> {
        match self.booking.review_readiness() {
            Ok(()) => {
                self.screen = Screen::Review;
                Ok(())
            }
            Err(step) => {
                let redirect = redirect_for(step);
                warn!(?step, ?redirect, "Review blocked, redirecting");
                self.screen = redirect;
                Err(FlowError::PreconditionNotMet { redirect })
            }
        }
    }

    /// Assemble the reviewed booking and submit it. On failure the booking
    /// returns to review, untouched and retryable.
    pub async fn confirm_booking(&mut self) -> Result<(), FlowError> {
        let record = match self.booking.assemble_record() {
            Ok(record) => record,
            Err(step) => {
                let redirect = redirect_for(step);
                warn!(?step, ?redirect, "Confirmation blocked, redirecting");
                self.screen = redirect;
                return Err(FlowError::PreconditionNotMet { redirect });
            }
        };

        if !self.booking.begin_confirm() {
            debug!("Confirmation already in flight or done, ignoring");
            return Ok(());
        }

        info!(bus_id = record.bus.id, fare = record.total_fare, "Submitting booking");
        match self.state.tickets.confirm_booking(record).await {
            Ok(ticket) => {
                info!(ticket_id = %ticket.ticket_id, "Booking confirmed");
                self.booking.confirm_succeeded(ticket);
                self.screen = Screen::Ticket;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Booking confirmation failed");
                self.booking
                    .confirm_failed("Failed to confirm booking. Please try again.".to_string());
                Err(err.into())
            }
        }
    }

    /// The confirmed ticket, falling back to the desk's last issued one when
    /// the flow state no longer holds it.
    pub async fn current_ticket(&self) -> Result<Option<Ticket>, FlowError> {
        if let Some(ticket) = self.booking.ticket() {
            return Ok(Some(ticket.clone()));
        }
        Ok(self.state.tickets.last_ticket().await?)
    }

    /// Reset the booking to its defaults and return to search. Search
    /// results stay around for the next run through the flow.
    pub fn start_new_booking(&mut self) {
        info!("Starting a new booking");
        self.booking.start_over();
        self.forms = FormSession::default();
        self.seat_map.clear();
        self.screen = Screen::Search;
    }
}

fn redirect_for(step: MissingStep) -> Screen {
    match step {
        MissingStep::BusSelection => Screen::Search,
        MissingStep::SeatSelection => Screen::SeatSelection,
        MissingStep::PassengerDetails | MissingStep::ContactDetails => Screen::PassengerDetails,
    }
}
