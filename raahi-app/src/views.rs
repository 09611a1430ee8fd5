use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use raahi_booking::Ticket;
use raahi_catalog::{seat_label, Bus, Seat};
use raahi_shared::format_inr;

/// Search results, one row per bus.
pub fn results_table(buses: &[Bus]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Bus", "Route", "Depart", "Arrive", "Duration", "Type", "Rating", "Seats left",
            "Per seat",
        ]);

    for bus in buses {
        table.add_row(vec![
            bus.name.clone(),
            format!("{} → {}", bus.from_city, bus.to_city),
            bus.departure.format("%H:%M").to_string(),
            bus.arrival.format("%H:%M").to_string(),
            bus.duration.clone(),
            format!("{:?}", bus.bus_type),
            format!("{:.1} ({})", bus.rating, bus.reviews),
            bus.available_seats.to_string(),
            format_inr(bus.price_per_seat),
        ]);
    }

    table.to_string()
}

/// "2A, 2C" style listing in selection order.
pub fn seat_labels(seats: &[Seat]) -> String {
    seats
        .iter()
        .map(|seat| seat_label(seat.row, seat.col))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The confirmed ticket, as the final summary screen shows it. The contact
/// values are deliberately revealed here; this is the customer's own ticket.
pub fn ticket_summary(ticket: &Ticket) -> String {
    let booking = &ticket.booking;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Ticket".to_string(), ticket.ticket_id.clone()]);

    table.add_row(vec![
        "Bus".to_string(),
        format!(
            "{} ({} → {})",
            booking.bus.name, booking.bus.from_city, booking.bus.to_city
        ),
    ]);
    table.add_row(vec![
        "Date".to_string(),
        booking.travel_date.format("%d-%b-%Y").to_string(),
    ]);
    table.add_row(vec![
        "Departure".to_string(),
        booking.bus.departure.format("%H:%M").to_string(),
    ]);
    table.add_row(vec!["Seats".to_string(), seat_labels(&booking.seats)]);

    for (index, passenger) in booking.passengers.iter().enumerate() {
        let age = passenger
            .age
            .map(|age| age.to_string())
            .unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            format!("Passenger {}", index + 1),
            format!(
                "{} {} ({})",
                passenger.first_name, passenger.last_name, age
            ),
        ]);
    }

    table.add_row(vec![
        "Contact".to_string(),
        format!(
            "{} / {}",
            booking.contact.email.inner(),
            booking.contact.phone.inner()
        ),
    ]);
    table.add_row(vec![
        "Total fare".to_string(),
        format_inr(booking.total_fare),
    ]);

    table.to_string()
}
