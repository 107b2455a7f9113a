//! Booking orchestration: local validation, then atomic seat reservation.

use crate::entities::booking;
use crate::error::{AppError, AppResult};
use crate::inventory::{BookingCandidate, BookingStore, SeatInventory};
use crate::seats;

/// Validate a booking candidate and reserve its seat.
///
/// Validation is fail-fast and reports only the first violated rule, in
/// order: required fields, seat grammar, payment state. Only a candidate
/// that passes every local check reaches the store; a lost reservation race
/// surfaces as [`AppError::SeatNotAvailable`] unchanged. No retries happen
/// here; callers decide whether to try another seat.
pub async fn create_booking<S: BookingStore>(
    inventory: &SeatInventory<S>,
    candidate: BookingCandidate,
) -> AppResult<booking::Model> {
    validate(&candidate)?;

    let booked = inventory.reserve_and_record(&candidate).await?;
    tracing::info!(
        booking_id = booked.id,
        flight_id = booked.flight_id,
        seat = %booked.seat_number,
        "booking created"
    );
    Ok(booked)
}

fn validate(candidate: &BookingCandidate) -> AppResult<()> {
    if candidate.customer_email.trim().is_empty() {
        return Err(AppError::InvalidBookingData(
            "Customer email is required".to_string(),
        ));
    }
    if candidate.seat_number.trim().is_empty() {
        return Err(AppError::InvalidBookingData(
            "Seat number is required".to_string(),
        ));
    }
    if !seats::is_valid_label(&candidate.seat_number) {
        return Err(AppError::InvalidBookingData(format!(
            "Invalid seat format '{}'. Use rows 1-10 and columns A-F (e.g. '5A', '10F', '3C').",
            candidate.seat_number
        )));
    }

    // An explicit paid=false is rejected; an absent paid flag is accepted.
    // This mirrors the behavior bookings have always had, asymmetric as it
    // is, rather than asserting a stricter business rule.
    if candidate.paid == Some(false) {
        return Err(AppError::InvalidBookingData(
            "Booking must be paid".to_string(),
        ));
    }

    Ok(())
}
