//! Seat inventory: derived occupancy queries and the atomic seat
//! reservation primitive.
//!
//! Occupancy is never cached; every query derives it from the booking set
//! so there is no second source of truth to drift from the store. Reads are
//! point-in-time snapshots and may be stale by the time the caller acts on
//! them, which is why [`BookingStore::reserve`] re-checks availability
//! inside its own transaction instead of trusting a prior read.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::catalog::FlightCatalog;
use crate::entities::booking;
use crate::error::{AppError, AppResult};
use crate::seats;

/// A booking as submitted by a caller, before an id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCandidate {
    pub flight_id: i32,
    pub seat_number: String,
    pub price: f64,
    #[serde(default)]
    pub luggage: bool,
    #[serde(default)]
    pub meal: bool,
    #[serde(default)]
    pub fare_class: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub paid: Option<bool>,
}

/// Storage boundary for bookings.
///
/// `reserve` is the one mutating operation in the whole core: an atomic
/// check-and-claim on a `(flight_id, seat_number)` key. Of any number of
/// concurrent reservations for the same key, exactly one commits; the rest
/// observe [`AppError::SeatNotAvailable`]. Keys for different seats never
/// serialize against each other.
#[allow(async_fn_in_trait)]
pub trait BookingStore: Send + Sync {
    /// Seat labels currently held by bookings on the flight, in no
    /// particular order.
    async fn booked_seats(&self, flight_id: i32) -> AppResult<Vec<String>>;

    /// Atomically claim the candidate's seat and persist the booking,
    /// returning it with its assigned id.
    async fn reserve(&self, candidate: &BookingCandidate) -> AppResult<booking::Model>;
}

/// Capacity snapshot for one flight, computed on demand from the booking
/// set and flight metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightCapacity {
    pub flight_id: i32,
    pub departure: String,
    pub arrival: String,
    pub date: String,
    pub total_seats: i32,
    pub booked_seats: i32,
    pub available_seats: i32,
    pub is_full: bool,
    pub occupancy_percentage: f64,
    pub booked_seat_numbers: Vec<String>,
}

/// Derived seat queries over a [`BookingStore`].
pub struct SeatInventory<S> {
    store: S,
}

impl<S: BookingStore> SeatInventory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn is_seat_available(&self, flight_id: i32, seat_number: &str) -> AppResult<bool> {
        let booked = self.store.booked_seats(flight_id).await?;
        Ok(!booked.iter().any(|s| s == seat_number))
    }

    pub async fn available_seats_count(&self, flight_id: i32) -> AppResult<i32> {
        let booked = self.store.booked_seats(flight_id).await?;
        Ok(seats::TOTAL_SEATS - booked.len() as i32)
    }

    pub async fn is_flight_full(&self, flight_id: i32) -> AppResult<bool> {
        Ok(self.available_seats_count(flight_id).await? == 0)
    }

    /// Booked seat labels sorted by (row, column): `1A, 1B, 2C, 5A, 10F`.
    pub async fn booked_seats(&self, flight_id: i32) -> AppResult<Vec<String>> {
        let mut booked = self.store.booked_seats(flight_id).await?;
        seats::sort_labels(&mut booked);
        Ok(booked)
    }

    /// First free seat in row-major order, `None` when the flight is full.
    /// A full flight is a normal answer here, not an error.
    pub async fn suggest_next_seat(&self, flight_id: i32) -> AppResult<Option<String>> {
        let booked = self.store.booked_seats(flight_id).await?;
        Ok(seats::first_free(&booked))
    }

    /// Join flight metadata with the derived occupancy counts. Fails with
    /// [`AppError::FlightNotFound`] when the catalog has no such flight.
    pub async fn capacity_snapshot<C: FlightCatalog>(
        &self,
        catalog: &C,
        flight_id: i32,
    ) -> AppResult<FlightCapacity> {
        let meta = catalog.flight_meta(flight_id).await?;
        let booked = self.booked_seats(flight_id).await?;

        let booked_count = booked.len() as i32;
        let available = seats::TOTAL_SEATS - booked_count;
        Ok(FlightCapacity {
            flight_id,
            departure: meta.departure,
            arrival: meta.arrival,
            date: meta.date,
            total_seats: seats::TOTAL_SEATS,
            booked_seats: booked_count,
            available_seats: available,
            is_full: available == 0,
            occupancy_percentage: f64::from(booked_count) / f64::from(seats::TOTAL_SEATS) * 100.0,
            booked_seat_numbers: booked,
        })
    }

    pub async fn reserve_and_record(&self, candidate: &BookingCandidate) -> AppResult<booking::Model> {
        self.store.reserve(candidate).await
    }
}

/// Booking store backed by the bookings table.
#[derive(Clone)]
pub struct DbBookingStore {
    db: DatabaseConnection,
}

impl DbBookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl BookingStore for DbBookingStore {
    async fn booked_seats(&self, flight_id: i32) -> AppResult<Vec<String>> {
        let bookings = booking::Entity::find()
            .filter(booking::Column::FlightId.eq(flight_id))
            .all(&self.db)
            .await?;
        Ok(bookings.into_iter().map(|b| b.seat_number).collect())
    }

    async fn reserve(&self, candidate: &BookingCandidate) -> AppResult<booking::Model> {
        let txn = self.db.begin().await?;

        let taken = booking::Entity::find()
            .filter(booking::Column::FlightId.eq(candidate.flight_id))
            .filter(booking::Column::SeatNumber.eq(candidate.seat_number.as_str()))
            .one(&txn)
            .await?;
        if taken.is_some() {
            txn.rollback().await?;
            return Err(AppError::SeatNotAvailable(format!(
                "Seat {} on flight {} is taken",
                candidate.seat_number, candidate.flight_id
            )));
        }

        // The unique index on (flight_id, seat_number) decides races the
        // pre-check cannot see: the losing insert fails and the transaction
        // rolls back on drop, leaving seat state untouched.
        let inserted = booking::ActiveModel {
            flight_id: Set(candidate.flight_id),
            seat_number: Set(candidate.seat_number.clone()),
            price: Set(candidate.price),
            luggage: Set(candidate.luggage),
            meal: Set(candidate.meal),
            fare_class: Set(candidate.fare_class.clone()),
            customer_email: Set(candidate.customer_email.clone()),
            customer_name: Set(candidate.customer_name.clone()),
            paid: Set(candidate.paid),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::SeatNotAvailable(format!(
                "Seat {} on flight {} is taken",
                candidate.seat_number, candidate.flight_id
            )),
            _ => AppError::from(e),
        })?;

        txn.commit().await?;
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seats::TOTAL_SEATS;
    use crate::testutil::{candidate, fixture_catalog, MemoryStore};

    #[tokio::test]
    async fn counts_derive_from_the_booking_set() {
        let inventory = SeatInventory::new(MemoryStore::default());

        assert_eq!(inventory.available_seats_count(1).await.unwrap(), TOTAL_SEATS);
        assert!(!inventory.is_flight_full(1).await.unwrap());

        for seat in ["5A", "1C", "10F"] {
            inventory.reserve_and_record(&candidate(1, seat)).await.unwrap();
        }

        assert_eq!(inventory.available_seats_count(1).await.unwrap(), TOTAL_SEATS - 3);
        assert!(!inventory.is_seat_available(1, "5A").await.unwrap());
        assert!(inventory.is_seat_available(1, "5B").await.unwrap());

        // Another flight's inventory is untouched.
        assert_eq!(inventory.available_seats_count(2).await.unwrap(), TOTAL_SEATS);
    }

    #[tokio::test]
    async fn booked_seats_are_sorted_by_row_then_column() {
        let inventory = SeatInventory::new(MemoryStore::default());
        for seat in ["10F", "2C", "1B", "5A", "1A"] {
            inventory.reserve_and_record(&candidate(7, seat)).await.unwrap();
        }

        let booked = inventory.booked_seats(7).await.unwrap();
        assert_eq!(booked, vec!["1A", "1B", "2C", "5A", "10F"]);
    }

    #[tokio::test]
    async fn snapshot_counts_stay_consistent() {
        let store = MemoryStore::default();
        let inventory = SeatInventory::new(store);
        let catalog = fixture_catalog();

        for seat in ["1A", "1B", "3D"] {
            inventory.reserve_and_record(&candidate(1, seat)).await.unwrap();
        }

        let snapshot = inventory.capacity_snapshot(&catalog, 1).await.unwrap();
        assert_eq!(snapshot.total_seats, TOTAL_SEATS);
        assert_eq!(snapshot.booked_seats, 3);
        assert_eq!(snapshot.available_seats, TOTAL_SEATS - 3);
        assert_eq!(snapshot.booked_seats + snapshot.available_seats, TOTAL_SEATS);
        assert!(!snapshot.is_full);
        assert!((snapshot.occupancy_percentage - 5.0).abs() < 1e-9);
        assert_eq!(snapshot.booked_seat_numbers, vec!["1A", "1B", "3D"]);
        assert_eq!(snapshot.departure, "AMS");
        assert_eq!(snapshot.arrival, "LON");
    }

    #[tokio::test]
    async fn snapshot_for_unknown_flight_is_flight_not_found() {
        let inventory = SeatInventory::new(MemoryStore::default());
        let catalog = fixture_catalog();

        let err = inventory.capacity_snapshot(&catalog, 999).await.unwrap_err();
        assert!(matches!(err, AppError::FlightNotFound(999)));
    }

    #[tokio::test]
    async fn suggestion_is_free_and_immediately_reservable() {
        let inventory = SeatInventory::new(MemoryStore::default());
        for seat in ["1A", "1B", "1C"] {
            inventory.reserve_and_record(&candidate(1, seat)).await.unwrap();
        }

        let suggested = inventory.suggest_next_seat(1).await.unwrap().unwrap();
        assert_eq!(suggested, "1D");
        assert!(!inventory.booked_seats(1).await.unwrap().contains(&suggested));

        inventory
            .reserve_and_record(&candidate(1, &suggested))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn full_flight_suggests_nothing_and_rejects_reservations() {
        let inventory = SeatInventory::new(MemoryStore::default());
        for seat in crate::seats::all_labels() {
            inventory.reserve_and_record(&candidate(1, &seat)).await.unwrap();
        }

        assert!(inventory.is_flight_full(1).await.unwrap());
        assert_eq!(inventory.available_seats_count(1).await.unwrap(), 0);
        assert_eq!(inventory.suggest_next_seat(1).await.unwrap(), None);

        let err = inventory
            .reserve_and_record(&candidate(1, "1A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SeatNotAvailable(_)));
    }

    #[tokio::test]
    async fn a_seat_is_never_sold_twice_sequentially() {
        let inventory = SeatInventory::new(MemoryStore::default());

        inventory.reserve_and_record(&candidate(1, "5A")).await.unwrap();
        let err = inventory
            .reserve_and_record(&candidate(1, "5A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SeatNotAvailable(_)));

        // Same seat on a different flight is a different key.
        inventory.reserve_and_record(&candidate(2, "5A")).await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_reservations_for_one_seat_have_exactly_one_winner() {
        const ATTEMPTS: usize = 16;

        let store = MemoryStore::default();
        let mut handles = Vec::new();
        for _ in 0..ATTEMPTS {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let inventory = SeatInventory::new(store);
                inventory.reserve_and_record(&candidate(1, "5A")).await
            }));
        }

        let mut won = 0;
        let mut lost = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(booking) => {
                    assert_eq!(booking.seat_number, "5A");
                    won += 1;
                }
                Err(AppError::SeatNotAvailable(_)) => lost += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(won, 1);
        assert_eq!(lost, ATTEMPTS - 1);

        let inventory = SeatInventory::new(store);
        let booked = inventory.booked_seats(1).await.unwrap();
        assert_eq!(booked, vec!["5A"]);
    }
}
