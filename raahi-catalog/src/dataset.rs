use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::model::{Amenity, Bus, BusId, BusType, City, Seat};
use crate::seatmap::seat_position;
use crate::service::{CatalogError, CatalogService};

/// The Delhi -> Mumbai service runs daily and is sold for whatever date the
/// customer searches. A named special case in the catalog data, not a general
/// rule.
pub const DATE_EXEMPT_ROUTE: (&str, &str) = ("Delhi", "Mumbai");

fn is_date_exempt(from_city: &str, to_city: &str) -> bool {
    (from_city, to_city) == DATE_EXEMPT_ROUTE
}

/// Catalog backed by the fixed in-memory dataset. Read-only; every call
/// clones out of the static tables.
pub struct StaticCatalog {
    cities: Vec<City>,
    buses: Vec<Bus>,
    booked_seats: HashMap<BusId, Vec<u32>>,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self {
            cities: seed_cities(),
            buses: seed_buses(),
            booked_seats: seed_booked_seats(),
        }
    }
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogService for StaticCatalog {
    async fn list_cities(&self) -> Result<Vec<City>, CatalogError> {
        Ok(self.cities.clone())
    }

    async fn search_buses(
        &self,
        from_city: &str,
        to_city: &str,
        date: NaiveDate,
    ) -> Result<Vec<Bus>, CatalogError> {
        let exempt = is_date_exempt(from_city, to_city);

        let matches = self
            .buses
            .iter()
            .filter(|bus| bus.from_city == from_city && bus.to_city == to_city)
            .filter(|bus| bus.date == date || exempt)
            .map(|bus| {
                let mut bus = bus.clone();
                if exempt {
                    // Sold for the searched date, not the timetable date.
                    bus.date = date;
                }
                bus
            })
            .collect();

        Ok(matches)
    }

    async fn bus_by_id(&self, id: BusId) -> Result<Bus, CatalogError> {
        self.buses
            .iter()
            .find(|bus| bus.id == id)
            .cloned()
            .ok_or(CatalogError::BusNotFound(id))
    }

    async fn seat_layout(&self, bus_id: BusId) -> Result<Vec<Seat>, CatalogError> {
        let bus = self.bus_by_id(bus_id).await?;
        let booked = self
            .booked_seats
            .get(&bus.id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let seats = (1..=bus.total_seats)
            .map(|seat_number| {
                let (row, col) = seat_position(seat_number);
                Seat {
                    seat_number,
                    row,
                    col,
                    is_booked: booked.contains(&seat_number),
                    price: bus.price_per_seat,
                }
            })
            .collect();

        Ok(seats)
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date in seed data")
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time of day in seed data")
}

fn city(id: u32, name: &str, code: &str) -> City {
    City {
        id,
        name: name.to_string(),
        code: code.to_string(),
    }
}

fn seed_cities() -> Vec<City> {
    vec![
        city(1, "Mumbai", "BOM"),
        city(2, "Delhi", "DEL"),
        city(3, "Bengaluru", "BLR"),
        city(4, "Chennai", "MAA"),
        city(5, "Kolkata", "CCU"),
        city(6, "Hyderabad", "HYD"),
        city(7, "Pune", "PNQ"),
        city(8, "Ahmedabad", "AMD"),
        city(9, "Jaipur", "JAI"),
        city(10, "Lucknow", "LKO"),
    ]
}

fn seed_buses() -> Vec<Bus> {
    use crate::model::Amenity::{Ac, Charging, Meal, Wifi};

    vec![
        Bus {
            id: 1,
            name: "Mumbai Express".to_string(),
            from_city: "Mumbai".to_string(),
            to_city: "Pune".to_string(),
            departure: time(8, 0),
            arrival: time(11, 0),
            duration: "3h".to_string(),
            price_per_seat: 400,
            total_seats: 42,
            available_seats: 18,
            amenities: vec![Ac, Charging],
            bus_type: BusType::Seater,
            rating: 4.5,
            reviews: 245,
            date: date(2025, 12, 10),
        },
        Bus {
            id: 2,
            name: "Delhi Superfast".to_string(),
            from_city: "Delhi".to_string(),
            to_city: "Jaipur".to_string(),
            departure: time(7, 0),
            arrival: time(11, 30),
            duration: "4h 30m".to_string(),
            price_per_seat: 550,
            total_seats: 36,
            available_seats: 8,
            amenities: vec![Ac, Wifi],
            bus_type: BusType::Seater,
            rating: 4.3,
            reviews: 189,
            date: date(2025, 12, 10),
        },
        Bus {
            id: 3,
            name: "Bengaluru Nightliner".to_string(),
            from_city: "Bengaluru".to_string(),
            to_city: "Chennai".to_string(),
            departure: time(22, 0),
            arrival: time(6, 0),
            duration: "8h".to_string(),
            price_per_seat: 700,
            total_seats: 48,
            available_seats: 25,
            amenities: vec![Wifi, Ac, Meal],
            bus_type: BusType::Sleeper,
            rating: 4.1,
            reviews: 156,
            date: date(2025, 12, 11),
        },
        Bus {
            id: 4,
            name: "Kolkata Comfort".to_string(),
            from_city: "Kolkata".to_string(),
            to_city: "Hyderabad".to_string(),
            departure: time(9, 0),
            arrival: time(21, 0),
            duration: "12h".to_string(),
            price_per_seat: 900,
            total_seats: 42,
            available_seats: 12,
            amenities: vec![Wifi, Ac],
            bus_type: BusType::Seater,
            rating: 4.4,
            reviews: 212,
            date: date(2025, 12, 12),
        },
        Bus {
            id: 5,
            name: "Lucknow Night Service".to_string(),
            from_city: "Lucknow".to_string(),
            to_city: "Delhi".to_string(),
            departure: time(20, 0),
            arrival: time(4, 0),
            duration: "8h".to_string(),
            price_per_seat: 650,
            total_seats: 42,
            available_seats: 5,
            amenities: vec![Ac, Charging],
            bus_type: BusType::Sleeper,
            rating: 4.6,
            reviews: 298,
            date: date(2025, 12, 11),
        },
        Bus {
            id: 6,
            name: "Ahmedabad Express".to_string(),
            from_city: "Ahmedabad".to_string(),
            to_city: "Mumbai".to_string(),
            departure: time(7, 0),
            arrival: time(15, 30),
            duration: "8h 30m".to_string(),
            price_per_seat: 800,
            total_seats: 36,
            available_seats: 22,
            amenities: vec![Ac, Wifi],
            bus_type: BusType::Seater,
            rating: 4.2,
            reviews: 134,
            date: date(2025, 12, 12),
        },
        Bus {
            id: 7,
            name: "Delhi - Patna Superfast".to_string(),
            from_city: "Delhi".to_string(),
            to_city: "Patna".to_string(),
            departure: time(18, 0),
            arrival: time(6, 0),
            duration: "12h".to_string(),
            price_per_seat: 900,
            total_seats: 42,
            available_seats: 30,
            amenities: vec![Ac, Wifi, Charging],
            bus_type: BusType::Sleeper,
            rating: 4.4,
            reviews: 98,
            date: date(2025, 12, 13),
        },
        Bus {
            id: 8,
            name: "Delhi - Mumbai Overnight".to_string(),
            from_city: "Delhi".to_string(),
            to_city: "Mumbai".to_string(),
            departure: time(21, 0),
            arrival: time(9, 0),
            duration: "12h".to_string(),
            price_per_seat: 1200,
            total_seats: 48,
            available_seats: 40,
            amenities: vec![Ac, Wifi, Meal],
            bus_type: BusType::Sleeper,
            rating: 4.7,
            reviews: 210,
            date: date(2025, 12, 13),
        },
    ]
}

fn seed_booked_seats() -> HashMap<BusId, Vec<u32>> {
    HashMap::from([
        (1, vec![2, 5, 8, 12, 15, 21, 28, 35, 40]),
        (2, vec![1, 3, 6, 14]),
        (3, vec![7, 9, 16, 22]),
        (4, vec![4, 10, 20]),
        (5, vec![11, 13, 19]),
        (6, vec![2, 17, 24]),
        (7, vec![3, 4, 5]),
        (8, vec![1, 2]),
    ])
}
