use raahi_catalog::{Bus, Seat};
use raahi_core::{total_fare, ContactInfo, PassengerInfo};

use crate::confirm::{BookingRecord, ConfirmationState, Ticket};

/// Fixed business rule: at most four tickets per booking.
pub const MAX_SEATS_PER_BOOKING: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatSelectionError {
    #[error("Seat {0} is already booked")]
    SeatAlreadyBooked(u32),

    #[error("Seat {0} is already selected")]
    SeatAlreadySelected(u32),

    #[error("You can book a maximum of 4 tickets at a time")]
    SelectionLimitReached,
}

/// The earliest step a booking is still missing. The flow layer turns these
/// into redirects instead of failing silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingStep {
    BusSelection,
    SeatSelection,
    PassengerDetails,
    ContactDetails,
}

/// Everything the current booking has accumulated so far. Created once at
/// startup, filled in across the screens, and reset wholesale by
/// `start_over`.
#[derive(Debug, Default)]
pub struct BookingState {
    bus: Option<Bus>,
    selected_seats: Vec<Seat>,
    passengers: Vec<PassengerInfo>,
    contact: ContactInfo,
    confirmation: ConfirmationState,
}

impl BookingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bus(&self) -> Option<&Bus> {
        self.bus.as_ref()
    }

    /// Picking a different bus starts the seat selection over; re-opening the
    /// same bus keeps it.
    pub fn choose_bus(&mut self, bus: Bus) {
        if self.bus.as_ref().map(|current| current.id) != Some(bus.id) {
            self.selected_seats.clear();
            self.passengers.clear();
        }
        self.bus = Some(bus);
    }

    /// In selection order, not seat-number order.
    pub fn selected_seats(&self) -> &[Seat] {
        &self.selected_seats
    }

    pub fn passengers(&self) -> &[PassengerInfo] {
        &self.passengers
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Always derived from the seat list, so it cannot drift.
    pub fn total_fare(&self) -> i32 {
        total_fare(&self.selected_seats)
    }

    /// Add a seat to the selection. Rejected, with the state untouched, when
    /// the seat is sold, already picked, or the selection is full. Each new
    /// seat brings a blank passenger slot with it.
    pub fn select_seat(&mut self, seat: Seat) -> Result<(), SeatSelectionError> {
        if seat.is_booked {
            return Err(SeatSelectionError::SeatAlreadyBooked(seat.seat_number));
        }
        if self
            .selected_seats
            .iter()
            .any(|s| s.seat_number == seat.seat_number)
        {
            return Err(SeatSelectionError::SeatAlreadySelected(seat.seat_number));
        }
        if self.selected_seats.len() >= MAX_SEATS_PER_BOOKING {
            return Err(SeatSelectionError::SelectionLimitReached);
        }

        self.selected_seats.push(seat);
        if self.passengers.len() < self.selected_seats.len() {
            self.passengers.push(PassengerInfo::default());
        }
        Ok(())
    }

    /// Remove a seat from the selection; a no-op when it is not selected.
    /// The passenger list is truncated from the end to the new selection
    /// length, so details typed into the dropped tail slot are discarded
    /// even when a middle seat was removed.
    pub fn deselect_seat(&mut self, seat_number: u32) {
        let before = self.selected_seats.len();
        self.selected_seats.retain(|s| s.seat_number != seat_number);
        if self.selected_seats.len() < before {
            self.passengers.truncate(self.selected_seats.len());
        }
    }

    pub fn set_passengers(&mut self, passengers: Vec<PassengerInfo>) {
        self.passengers = passengers;
    }

    pub fn set_contact(&mut self, contact: ContactInfo) {
        self.contact = contact;
    }

    /// Review and confirmation require the whole flow to be complete.
    pub fn review_readiness(&self) -> Result<(), MissingStep> {
        if self.bus.is_none() {
            return Err(MissingStep::BusSelection);
        }
        if self.selected_seats.is_empty() {
            return Err(MissingStep::SeatSelection);
        }
        if self.passengers.len() != self.selected_seats.len()
            || !self.passengers.iter().all(PassengerInfo::is_complete)
        {
            return Err(MissingStep::PassengerDetails);
        }
        if !self.contact.is_complete() {
            return Err(MissingStep::ContactDetails);
        }
        Ok(())
    }

    /// Snapshot the booking exactly as reviewed, for submission.
    pub fn assemble_record(&self) -> Result<BookingRecord, MissingStep> {
        self.review_readiness()?;
        let bus = match &self.bus {
            Some(bus) => bus.clone(),
            None => return Err(MissingStep::BusSelection),
        };

        Ok(BookingRecord {
            travel_date: bus.date,
            bus,
            seats: self.selected_seats.clone(),
            total_fare: self.total_fare(),
            passengers: self.passengers.clone(),
            contact: self.contact.clone(),
        })
    }

    pub fn confirmation(&self) -> &ConfirmationState {
        &self.confirmation
    }

    /// Review -> Confirming. Refused unless the booking is sitting in review,
    /// so a double tap cannot submit twice.
    pub fn begin_confirm(&mut self) -> bool {
        match self.confirmation {
            ConfirmationState::Review { .. } => {
                self.confirmation = ConfirmationState::Confirming;
                true
            }
            _ => false,
        }
    }

    pub fn confirm_succeeded(&mut self, ticket: Ticket) {
        if matches!(self.confirmation, ConfirmationState::Confirming) {
            self.confirmation = ConfirmationState::Confirmed(ticket);
        }
    }

    /// Back to review with a retryable message. Seats, passengers, and
    /// contact are all kept; nothing was partially committed.
    pub fn confirm_failed(&mut self, message: String) {
        if matches!(self.confirmation, ConfirmationState::Confirming) {
            self.confirmation = ConfirmationState::Review {
                error: Some(message),
            };
        }
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        match &self.confirmation {
            ConfirmationState::Confirmed(ticket) => Some(ticket),
            _ => None,
        }
    }

    /// "New booking": identical to a freshly constructed state.
    pub fn start_over(&mut self) {
        *self = BookingState::default();
    }
}
