use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::booking;
use crate::catalog::DbCatalog;
use crate::entities::booking as booking_entity;
use crate::error::AppResult;
use crate::inventory::{BookingCandidate, DbBookingStore, FlightCapacity, SeatInventory};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i32,
    pub flight_id: i32,
    pub seat_number: String,
    pub price: f64,
    pub luggage: bool,
    pub meal: bool,
    pub fare_class: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub paid: Option<bool>,
}

impl From<booking_entity::Model> for BookingResponse {
    fn from(booked: booking_entity::Model) -> Self {
        Self {
            id: booked.id,
            flight_id: booked.flight_id,
            seat_number: booked.seat_number,
            price: booked.price,
            luggage: booked.luggage,
            meal: booked.meal,
            fare_class: booked.fare_class,
            customer_email: booked.customer_email,
            customer_name: booked.customer_name,
            paid: booked.paid,
        }
    }
}

fn inventory(state: &AppState) -> SeatInventory<DbBookingStore> {
    SeatInventory::new(DbBookingStore::new(state.db.clone()))
}

/// Create a booking
pub async fn create(
    State(state): State<AppState>,
    Json(candidate): Json<BookingCandidate>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let booked = booking::create_booking(&inventory(&state), candidate).await?;
    Ok((StatusCode::CREATED, Json(booked.into())))
}

/// Get the capacity snapshot for a flight
pub async fn flight_capacity(
    State(state): State<AppState>,
    Path(flight_id): Path<i32>,
) -> AppResult<Json<FlightCapacity>> {
    let catalog = DbCatalog::new(state.db.clone());
    let snapshot = inventory(&state).capacity_snapshot(&catalog, flight_id).await?;
    Ok(Json(snapshot))
}

pub async fn is_flight_full(
    State(state): State<AppState>,
    Path(flight_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let is_full = inventory(&state).is_flight_full(flight_id).await?;
    Ok(Json(serde_json::json!({
        "flightId": flight_id,
        "isFull": is_full,
    })))
}

pub async fn available_seats(
    State(state): State<AppState>,
    Path(flight_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let available = inventory(&state).available_seats_count(flight_id).await?;
    Ok(Json(serde_json::json!({
        "flightId": flight_id,
        "availableSeats": available,
    })))
}

pub async fn booked_seats(
    State(state): State<AppState>,
    Path(flight_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let booked = inventory(&state).booked_seats(flight_id).await?;
    Ok(Json(serde_json::json!({
        "flightId": flight_id,
        "bookedSeats": booked,
    })))
}

/// Suggest the next free seat; a full flight is reported, not an error
pub async fn suggest_seat(
    State(state): State<AppState>,
    Path(flight_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let suggested = inventory(&state).suggest_next_seat(flight_id).await?;
    let body = match suggested {
        Some(seat) => serde_json::json!({
            "flightId": flight_id,
            "suggestedSeat": seat,
        }),
        None => serde_json::json!({
            "flightId": flight_id,
            "message": "Flight is full",
        }),
    };
    Ok(Json(body))
}
