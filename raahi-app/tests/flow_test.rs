use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use raahi_app::{AppState, BookingFlow, FlowError, Screen};
use raahi_booking::{
    BookingRecord, ConfirmError, ConfirmationService, ConfirmationState, ContactEdit,
    PassengerEdit, SearchForm, SeatSelectionError, Ticket, TicketDesk,
};
use raahi_catalog::{Bus, BusId, CatalogError, CatalogService, City, Seat, StaticCatalog};
use raahi_core::Gender;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn search_form(from: &str, to: &str, date: NaiveDate) -> SearchForm {
    SearchForm {
        from_city: from.to_string(),
        to_city: to.to_string(),
        date: Some(date),
    }
}

fn fill_passenger(flow: &mut BookingFlow, index: usize, first: &str, age: u16, gender: Gender) {
    flow.edit_passenger(index, PassengerEdit::FirstName(first.to_string()));
    flow.edit_passenger(index, PassengerEdit::LastName("Singh".to_string()));
    flow.edit_passenger(index, PassengerEdit::Age(Some(age)));
    flow.edit_passenger(index, PassengerEdit::Gender(Some(gender)));
}

fn fill_contact(flow: &mut BookingFlow) {
    flow.edit_contact(ContactEdit::Email("anuj@gmail.com".to_string()));
    flow.edit_contact(ContactEdit::Phone("9876543212".to_string()));
}

/// Catalog that refuses the first N searches, then behaves normally.
struct FlakyCatalog {
    inner: StaticCatalog,
    search_failures_left: AtomicUsize,
}

impl FlakyCatalog {
    fn failing_once() -> Self {
        Self {
            inner: StaticCatalog::new(),
            search_failures_left: AtomicUsize::new(1),
        }
    }
}

#[async_trait]
impl CatalogService for FlakyCatalog {
    async fn list_cities(&self) -> Result<Vec<City>, CatalogError> {
        self.inner.list_cities().await
    }

    async fn search_buses(
        &self,
        from_city: &str,
        to_city: &str,
        date: NaiveDate,
    ) -> Result<Vec<Bus>, CatalogError> {
        if self.search_failures_left.load(Ordering::SeqCst) > 0 {
            self.search_failures_left.fetch_sub(1, Ordering::SeqCst);
            return Err(CatalogError::Unavailable("connection reset".to_string()));
        }
        self.inner.search_buses(from_city, to_city, date).await
    }

    async fn bus_by_id(&self, id: BusId) -> Result<Bus, CatalogError> {
        self.inner.bus_by_id(id).await
    }

    async fn seat_layout(&self, bus_id: BusId) -> Result<Vec<Seat>, CatalogError> {
        self.inner.seat_layout(bus_id).await
    }
}

/// Confirmation desk that refuses the first N submissions.
struct FlakyDesk {
    inner: TicketDesk,
    failures_left: AtomicUsize,
}

impl FlakyDesk {
    fn failing_once() -> Self {
        Self {
            inner: TicketDesk::new(),
            failures_left: AtomicUsize::new(1),
        }
    }
}

#[async_trait]
impl ConfirmationService for FlakyDesk {
    async fn confirm_booking(&self, record: BookingRecord) -> Result<Ticket, ConfirmError> {
        if self.failures_left.load(Ordering::SeqCst) > 0 {
            self.failures_left.fetch_sub(1, Ordering::SeqCst);
            return Err(ConfirmError::Unavailable("desk offline".to_string()));
        }
        self.inner.confirm_booking(record).await
    }

    async fn last_ticket(&self) -> Result<Option<Ticket>, ConfirmError> {
        self.inner.last_ticket().await
    }
}

fn in_memory_flow() -> BookingFlow {
    BookingFlow::new(AppState::in_memory())
}

#[tokio::test]
async fn test_the_whole_flow_issues_a_ticket() {
    let mut flow = in_memory_flow();

    let cities = flow.load_cities().await.unwrap();
    assert_eq!(cities.len(), 10);

    flow.submit_search(search_form("Mumbai", "Pune", d(2025, 12, 10)))
        .await
        .unwrap();
    assert_eq!(flow.screen(), Screen::Results);
    let results = flow.search.results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Mumbai Express");

    flow.open_seat_selection(1).await.unwrap();
    assert_eq!(flow.seat_map().len(), 42);
    flow.select_seat(1).unwrap();
    flow.select_seat(3).unwrap();
    assert_eq!(flow.booking.total_fare(), 800);

    // Seat 2 is sold on this bus; the selection must not change.
    let err = flow.select_seat(2).unwrap_err();
    assert!(matches!(
        err,
        FlowError::SeatSelection(SeatSelectionError::SeatAlreadyBooked(2))
    ));
    assert_eq!(flow.booking.selected_seats().len(), 2);

    // Change of mind: picking up and dropping a third seat leaves the fare alone.
    flow.select_seat(4).unwrap();
    flow.deselect_seat(4);
    assert_eq!(flow.booking.total_fare(), 800);

    flow.open_passenger_details().unwrap();
    fill_passenger(&mut flow, 0, "Anuj", 26, Gender::Male);
    fill_passenger(&mut flow, 1, "Bela", 24, Gender::Female);
    fill_contact(&mut flow);
    flow.submit_passenger_details().unwrap();
    assert_eq!(flow.screen(), Screen::Review);

    flow.confirm_booking().await.unwrap();
    assert_eq!(flow.screen(), Screen::Ticket);

    let ticket = flow.current_ticket().await.unwrap().unwrap();
    assert!(ticket.ticket_id.starts_with("TKT-"));
    assert_eq!(ticket.booking.bus.id, 1);
    assert_eq!(ticket.booking.total_fare, 800);
    assert_eq!(ticket.booking.passengers[0].first_name, "Anuj");
    assert_eq!(ticket.booking.contact.email.inner(), "anuj@gmail.com");
    // Travel date echoes what was reviewed.
    assert_eq!(ticket.booking.travel_date, d(2025, 12, 10));
}

#[tokio::test]
async fn test_a_search_with_no_matches_is_a_result_not_an_error() {
    let mut flow = in_memory_flow();

    flow.submit_search(search_form("Mumbai", "Pune", d(2025, 12, 11)))
        .await
        .unwrap();

    assert_eq!(flow.screen(), Screen::Results);
    assert!(flow.search.found_nothing());
}

#[tokio::test]
async fn test_invalid_search_fields_never_reach_the_catalog() {
    let mut flow = in_memory_flow();

    let err = flow
        .submit_search(search_form("Mumbai", "Mumbai", d(2025, 12, 10)))
        .await
        .unwrap_err();

    match err {
        FlowError::InvalidSearch(errors) => {
            assert_eq!(
                errors.to_city,
                Some("Departure and destination must be different")
            );
        }
        other => panic!("expected invalid search, got {:?}", other),
    }
    assert_eq!(flow.screen(), Screen::Search);
}

#[tokio::test]
async fn test_a_failed_search_can_be_retried() {
    let state = AppState {
        catalog: Arc::new(FlakyCatalog::failing_once()),
        tickets: Arc::new(TicketDesk::new()),
    };
    let mut flow = BookingFlow::new(state);

    let err = flow
        .submit_search(search_form("Mumbai", "Pune", d(2025, 12, 10)))
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Catalog(_)));
    assert!(flow.search.retryable_criteria().is_some());

    flow.retry_search().await.unwrap();
    assert_eq!(flow.screen(), Screen::Results);
    assert_eq!(flow.search.results().unwrap().len(), 1);
}

#[tokio::test]
async fn test_confirming_without_details_redirects_to_the_missing_step() {
    let mut flow = in_memory_flow();

    flow.submit_search(search_form("Mumbai", "Pune", d(2025, 12, 10)))
        .await
        .unwrap();
    flow.open_seat_selection(1).await.unwrap();
    flow.select_seat(1).unwrap();

    let err = flow.confirm_booking().await.unwrap_err();
    match err {
        FlowError::PreconditionNotMet { redirect } => {
            assert_eq!(redirect, Screen::PassengerDetails);
        }
        other => panic!("expected precondition error, got {:?}", other),
    }
    assert_eq!(flow.screen(), Screen::PassengerDetails);
}

#[tokio::test]
async fn test_passenger_details_cannot_be_skipped_without_seats() {
    let mut flow = in_memory_flow();

    let err = flow.open_passenger_details().unwrap_err();
    assert!(matches!(
        err,
        FlowError::PreconditionNotMet {
            redirect: Screen::SeatSelection
        }
    ));
}

#[tokio::test]
async fn test_a_failed_confirmation_keeps_the_booking_and_retries() {
    let state = AppState {
        catalog: Arc::new(StaticCatalog::new()),
        tickets: Arc::new(FlakyDesk::failing_once()),
    };
    let mut flow = BookingFlow::new(state);

    flow.submit_search(search_form("Mumbai", "Pune", d(2025, 12, 10)))
        .await
        .unwrap();
    flow.open_seat_selection(1).await.unwrap();
    flow.select_seat(1).unwrap();
    flow.open_passenger_details().unwrap();
    fill_passenger(&mut flow, 0, "Anuj", 26, Gender::Male);
    fill_contact(&mut flow);
    flow.submit_passenger_details().unwrap();

    let err = flow.confirm_booking().await.unwrap_err();
    assert!(matches!(err, FlowError::Confirmation(_)));

    // Still in review with the selection intact and a retryable error.
    match flow.booking.confirmation() {
        ConfirmationState::Review { error: Some(_) } => {}
        other => panic!("expected review with error, got {:?}", other),
    }
    assert_eq!(flow.booking.selected_seats().len(), 1);
    assert_eq!(flow.booking.passengers().len(), 1);

    flow.confirm_booking().await.unwrap();
    assert_eq!(flow.screen(), Screen::Ticket);
    assert!(flow.current_ticket().await.unwrap().is_some());
}

#[tokio::test]
async fn test_delhi_mumbai_books_on_any_date() {
    let mut flow = in_memory_flow();

    let travel_date = d(2026, 1, 15);
    flow.submit_search(search_form("Delhi", "Mumbai", travel_date))
        .await
        .unwrap();

    let results = flow.search.results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 8);
    assert_eq!(results[0].date, travel_date);

    flow.open_seat_selection(8).await.unwrap();
    flow.select_seat(3).unwrap();
    flow.open_passenger_details().unwrap();
    fill_passenger(&mut flow, 0, "Anuj", 26, Gender::Male);
    fill_contact(&mut flow);
    flow.submit_passenger_details().unwrap();
    flow.confirm_booking().await.unwrap();

    let ticket = flow.current_ticket().await.unwrap().unwrap();
    assert_eq!(ticket.booking.travel_date, travel_date);
}

#[tokio::test]
async fn test_a_new_booking_resets_the_flow_but_keeps_the_results() {
    let mut flow = in_memory_flow();

    flow.submit_search(search_form("Mumbai", "Pune", d(2025, 12, 10)))
        .await
        .unwrap();
    flow.open_seat_selection(1).await.unwrap();
    flow.select_seat(1).unwrap();
    flow.open_passenger_details().unwrap();
    fill_passenger(&mut flow, 0, "Anuj", 26, Gender::Male);
    fill_contact(&mut flow);
    flow.submit_passenger_details().unwrap();
    flow.confirm_booking().await.unwrap();

    flow.start_new_booking();

    assert_eq!(flow.screen(), Screen::Search);
    assert!(flow.booking.bus().is_none());
    assert!(flow.booking.selected_seats().is_empty());
    assert_eq!(flow.booking.total_fare(), 0);
    assert_eq!(
        flow.booking.confirmation(),
        &ConfirmationState::Review { error: None }
    );
    // The last search sticks around, as the results screen does.
    assert!(flow.search.results().is_some());

    // The desk still remembers the issued ticket for the view screen.
    assert!(flow.current_ticket().await.unwrap().is_some());
}

#[tokio::test]
async fn test_seat_numbers_outside_the_layout_are_rejected() {
    let mut flow = in_memory_flow();

    flow.submit_search(search_form("Mumbai", "Pune", d(2025, 12, 10)))
        .await
        .unwrap();
    flow.open_seat_selection(1).await.unwrap();

    let err = flow.select_seat(99).unwrap_err();
    assert!(matches!(err, FlowError::UnknownSeat(99)));
    assert!(flow.booking.selected_seats().is_empty());
}
