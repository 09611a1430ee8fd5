use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use raahi_catalog::{Bus, Seat};
use raahi_core::{ContactInfo, PassengerInfo};

/// A finalized booking, submitted for confirmation exactly as reviewed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    pub bus: Bus,
    pub seats: Vec<Seat>,
    pub total_fare: i32,
    pub passengers: Vec<PassengerInfo>,
    pub contact: ContactInfo,
    pub travel_date: NaiveDate,
}

/// A confirmed booking plus the identifier the confirmation desk issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub ticket_id: String,
    pub issued_at: DateTime<Utc>,
    pub booking: BookingRecord,
}

/// Review -> Confirming -> Confirmed. A failed submission falls back to
/// `Review` carrying a retryable message; nothing is partially committed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationState {
    Review { error: Option<String> },
    Confirming,
    Confirmed(Ticket),
}

impl Default for ConfirmationState {
    fn default() -> Self {
        ConfirmationState::Review { error: None }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfirmError {
    #[error("Booking submission failed: {0}")]
    Unavailable(String),
}

/// Write-side collaborator: accepts a finalized booking, issues the ticket.
#[async_trait]
pub trait ConfirmationService: Send + Sync {
    async fn confirm_booking(&self, record: BookingRecord) -> Result<Ticket, ConfirmError>;

    /// The most recently issued ticket, if any. Lets the ticket view recover
    /// a booking after the flow state was dropped.
    async fn last_ticket(&self) -> Result<Option<Ticket>, ConfirmError>;
}

/// In-memory confirmation desk. Issues "TKT-XXXXXXXX" identifiers and keeps
/// the last ticket it printed.
#[derive(Default)]
pub struct TicketDesk {
    last: Mutex<Option<Ticket>>,
}

impl TicketDesk {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfirmationService for TicketDesk {
    async fn confirm_booking(&self, record: BookingRecord) -> Result<Ticket, ConfirmError> {
        let reference = Uuid::new_v4().simple().to_string();
        let ticket = Ticket {
            ticket_id: format!("TKT-{}", reference[..8].to_uppercase()),
            issued_at: Utc::now(),
            booking: record,
        };

        tracing::info!(
            ticket_id = %ticket.ticket_id,
            bus_id = ticket.booking.bus.id,
            seats = ticket.booking.seats.len(),
            fare = ticket.booking.total_fare,
            "Ticket issued"
        );

        *self.last.lock().expect("ticket desk lock poisoned") = Some(ticket.clone());
        Ok(ticket)
    }

    async fn last_ticket(&self) -> Result<Option<Ticket>, ConfirmError> {
        Ok(self.last.lock().expect("ticket desk lock poisoned").clone())
    }
}
