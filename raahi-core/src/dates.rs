use chrono::{Datelike, Duration, NaiveDate};

/// How far ahead a journey can be booked, unless configured otherwise.
pub const DEFAULT_BOOKING_WINDOW_DAYS: i64 = 90;

/// Travel starts no earlier than the day of booking.
pub fn earliest_travel_date(today: NaiveDate) -> NaiveDate {
    today
}

pub fn latest_travel_date(today: NaiveDate, window_days: i64) -> NaiveDate {
    today + Duration::days(window_days)
}

/// Search forms default to the coming Friday. On a Friday the default rolls
/// over to the next one.
pub fn default_travel_date(today: NaiveDate) -> NaiveDate {
    // Sunday = 0 .. Friday = 5
    let weekday = today.weekday().num_days_from_sunday() as i64;
    let mut days_until_friday = (5 - weekday).rem_euclid(7);
    if days_until_friday == 0 {
        days_until_friday = 7;
    }
    today + Duration::days(days_until_friday)
}
