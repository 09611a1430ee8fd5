use raahi_app::app_config::Config;
use raahi_app::{views, AppState, BookingFlow};
use raahi_booking::{ContactEdit, PassengerEdit, SearchForm};
use raahi_core::dates::{default_travel_date, earliest_travel_date, latest_travel_date};
use raahi_core::Gender;
use raahi_shared::format_inr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SAMPLE_PASSENGERS: [(&str, &str, u16, Gender); 4] = [
    ("Anuj", "Singh", 26, Gender::Male),
    ("Bela", "Singh", 24, Gender::Female),
    ("Chirag", "Mehta", 31, Gender::Male),
    ("Divya", "Rao", 29, Gender::Female),
];

/// Walks the whole booking flow against the in-memory collaborators:
/// search, seat selection, passenger details, review, confirmation.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "raahi_app=info,raahi_booking=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let today = chrono::Utc::now().date_naive();
    tracing::info!(
        from = %earliest_travel_date(today),
        until = %latest_travel_date(today, config.search.advance_days),
        "Booking window open"
    );

    let mut flow = BookingFlow::new(AppState::in_memory());

    let cities = flow.load_cities().await?;
    tracing::info!(count = cities.len(), "Cities available for search");

    let travel_date = config.demo.date.unwrap_or_else(|| default_travel_date(today));
    flow.submit_search(SearchForm {
        from_city: config.demo.from_city.clone(),
        to_city: config.demo.to_city.clone(),
        date: Some(travel_date),
    })
    .await?;

    let results = flow.search.results().unwrap_or_default().to_vec();
    println!("{}", views::results_table(&results));

    let Some(bus) = results.first() else {
        println!(
            "No buses found from {} to {} on {}.",
            config.demo.from_city, config.demo.to_city, travel_date
        );
        return Ok(());
    };

    flow.open_seat_selection(bus.id).await?;
    for seat_number in &config.demo.seats {
        flow.select_seat(*seat_number)?;
    }
    println!(
        "Selected seats {} (total {})",
        views::seat_labels(flow.booking.selected_seats()),
        format_inr(flow.booking.total_fare())
    );

    flow.open_passenger_details()?;
    let passenger_count = flow.booking.selected_seats().len();
    for index in 0..passenger_count {
        let (first, last, age, gender) = SAMPLE_PASSENGERS[index % SAMPLE_PASSENGERS.len()];
        flow.edit_passenger(index, PassengerEdit::FirstName(first.to_string()));
        flow.edit_passenger(index, PassengerEdit::LastName(last.to_string()));
        flow.edit_passenger(index, PassengerEdit::Age(Some(age)));
        flow.edit_passenger(index, PassengerEdit::Gender(Some(gender)));
    }
    flow.edit_contact(ContactEdit::Email("anuj@gmail.com".to_string()));
    flow.edit_contact(ContactEdit::Phone("9876543212".to_string()));
    flow.submit_passenger_details()?;

    flow.confirm_booking().await?;
    if let Some(ticket) = flow.current_ticket().await? {
        println!("{}", views::ticket_summary(&ticket));
    }

    Ok(())
}
