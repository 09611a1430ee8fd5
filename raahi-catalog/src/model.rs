use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub type CityId = u32;
pub type BusId = u32;

/// A city the operator services. Static catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusType {
    Seater,
    Sleeper,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Amenity {
    Ac,
    Wifi,
    Charging,
    Meal,
}

/// One timetable entry. Immutable, uniquely identified by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bus {
    pub id: BusId,
    pub name: String,
    pub from_city: String,
    pub to_city: String,
    pub departure: NaiveTime,
    pub arrival: NaiveTime,
    /// Display label, e.g. "8h 30m". Kept as the catalog supplies it.
    pub duration: String,
    pub price_per_seat: i32,
    pub total_seats: u32,
    pub available_seats: u32,
    pub amenities: Vec<Amenity>,
    pub bus_type: BusType,
    pub rating: f32,
    pub reviews: u32,
    pub date: NaiveDate,
}

/// One bookable unit on a bus. Generated from the bus layout, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    /// 1-based, unique per bus.
    pub seat_number: u32,
    pub row: u32,
    pub col: u32,
    pub is_booked: bool,
    pub price: i32,
}
