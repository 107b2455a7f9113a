//! In-memory catalog and booking store fixtures shared across tests.

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::catalog::FlightCatalog;
use crate::entities::{booking, flight};
use crate::error::{AppError, AppResult};
use crate::inventory::{BookingCandidate, BookingStore};

/// An instant on the fixture day (2099-06-01, UTC).
pub fn fixture_instant(hour: u32, minute: u32) -> DateTimeWithTimeZone {
    Utc.with_ymd_and_hms(2099, 6, 1, hour, minute, 0)
        .unwrap()
        .fixed_offset()
}

pub fn fixture_flight(
    id: i32,
    departure: &str,
    arrival: &str,
    departure_time: DateTimeWithTimeZone,
    arrival_time: DateTimeWithTimeZone,
) -> flight::Model {
    flight::Model {
        id,
        departure: departure.to_string(),
        arrival: arrival.to_string(),
        departure_time,
        arrival_time,
    }
}

/// A catalog holding flight 1, AMS -> LON, for snapshot tests.
pub fn fixture_catalog() -> MemoryCatalog {
    MemoryCatalog::new(vec![fixture_flight(
        1,
        "AMS",
        "LON",
        fixture_instant(8, 0),
        fixture_instant(10, 0),
    )])
}

/// A valid booking candidate for the given seat.
pub fn candidate(flight_id: i32, seat_number: &str) -> BookingCandidate {
    BookingCandidate {
        flight_id,
        seat_number: seat_number.to_string(),
        price: 199.99,
        luggage: true,
        meal: false,
        fare_class: "ECONOMY".to_string(),
        customer_email: "jane@example.com".to_string(),
        customer_name: Some("Jane Doe".to_string()),
        paid: Some(true),
    }
}

pub struct MemoryCatalog {
    flights: Vec<flight::Model>,
}

impl MemoryCatalog {
    pub fn new(flights: Vec<flight::Model>) -> Self {
        Self { flights }
    }
}

impl FlightCatalog for MemoryCatalog {
    async fn flights_departing_from(
        &self,
        location: &str,
        not_before: DateTimeWithTimeZone,
    ) -> AppResult<Vec<flight::Model>> {
        Ok(self
            .flights
            .iter()
            .filter(|f| f.departure.eq_ignore_ascii_case(location))
            .filter(|f| f.departure_time >= not_before)
            .cloned()
            .collect())
    }

    async fn flight_by_id(&self, id: i32) -> AppResult<flight::Model> {
        self.flights
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or(AppError::FlightNotFound(id))
    }
}

/// Booking store holding bookings behind a mutex. The lock makes the
/// check-and-insert in `reserve` atomic, mirroring what the transactional
/// store guarantees through its unique index.
#[derive(Clone, Default)]
pub struct MemoryStore {
    bookings: Arc<Mutex<Vec<booking::Model>>>,
}

impl BookingStore for MemoryStore {
    async fn booked_seats(&self, flight_id: i32) -> AppResult<Vec<String>> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .iter()
            .filter(|b| b.flight_id == flight_id)
            .map(|b| b.seat_number.clone())
            .collect())
    }

    async fn reserve(&self, candidate: &BookingCandidate) -> AppResult<booking::Model> {
        let mut bookings = self.bookings.lock().unwrap();

        let taken = bookings
            .iter()
            .any(|b| b.flight_id == candidate.flight_id && b.seat_number == candidate.seat_number);
        if taken {
            return Err(AppError::SeatNotAvailable(format!(
                "Seat {} on flight {} is taken",
                candidate.seat_number, candidate.flight_id
            )));
        }

        let booked = booking::Model {
            id: bookings.len() as i32 + 1,
            flight_id: candidate.flight_id,
            seat_number: candidate.seat_number.clone(),
            price: candidate.price,
            luggage: candidate.luggage,
            meal: candidate.meal,
            fare_class: candidate.fare_class.clone(),
            customer_email: candidate.customer_email.clone(),
            customer_name: candidate.customer_name.clone(),
            paid: candidate.paid,
            created_at: fixture_instant(0, 0),
        };
        bookings.push(booked.clone());
        Ok(booked)
    }
}
