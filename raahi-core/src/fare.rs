use raahi_catalog::Seat;

/// Total fare of a selection: the sum of each selected seat's price. No
/// taxes, discounts, or surcharges. Callers recompute from the seat list
/// whenever it changes instead of caching the number separately.
pub fn total_fare(seats: &[Seat]) -> i32 {
    seats.iter().map(|seat| seat.price).sum()
}
