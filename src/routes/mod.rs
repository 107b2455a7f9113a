use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{bookings, flights};
use crate::middleware::rate_limit::{create_public_governor, log_request};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // All routes are public; rate limiting is per client IP
    let public_governor = create_public_governor();

    Router::new()
        // Flight search
        .route("/api/flights/search", get(flights::search))
        // Bookings
        .route("/api/bookings", post(bookings::create))
        // Flight capacity
        .route("/api/flights/{flight_id}/capacity", get(bookings::flight_capacity))
        .route("/api/flights/{flight_id}/is-full", get(bookings::is_flight_full))
        .route(
            "/api/flights/{flight_id}/available-seats",
            get(bookings::available_seats),
        )
        .route(
            "/api/flights/{flight_id}/booked-seats",
            get(bookings::booked_seats),
        )
        .route(
            "/api/flights/{flight_id}/suggest-seat",
            get(bookings::suggest_seat),
        )
        .layer(middleware::from_fn(log_request))
        .layer(public_governor)
        .with_state(state)
}
