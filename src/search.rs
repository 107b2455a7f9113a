//! Connection-flight search: bounded breadth-first expansion over the
//! flight graph exposed by the [`FlightCatalog`].

use std::collections::VecDeque;

use chrono::DateTime;
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::catalog::FlightCatalog;
use crate::entities::flight;
use crate::error::{AppError, AppResult};

/// Hop limit: itineraries never exceed this many legs.
pub const MAX_LEGS: usize = 6;

/// A validated search request. Locations are lowercased on entry; all
/// comparisons downstream are case-insensitive.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub departure: String,
    pub arrival: String,
    pub earliest_departure: DateTimeWithTimeZone,
}

impl SearchQuery {
    /// Validate raw search input. Rejects empty locations, a departure equal
    /// to the arrival (case-insensitive), unparseable datetimes and datetimes
    /// not strictly after `now`. The catalog is never touched for invalid
    /// input.
    pub fn parse(
        departure: &str,
        arrival: &str,
        datetime: &str,
        now: DateTimeWithTimeZone,
    ) -> AppResult<Self> {
        if departure.trim().is_empty() {
            return Err(AppError::InvalidSearchParameters(
                "Departure cannot be empty.".to_string(),
            ));
        }
        if arrival.trim().is_empty() {
            return Err(AppError::InvalidSearchParameters(
                "Arrival cannot be empty.".to_string(),
            ));
        }

        let departure = departure.to_lowercase();
        let arrival = arrival.to_lowercase();
        if departure == arrival {
            return Err(AppError::InvalidSearchParameters(
                "Departure and arrival cannot be the same.".to_string(),
            ));
        }

        let earliest_departure = DateTime::parse_from_rfc3339(datetime).map_err(|_| {
            AppError::InvalidSearchParameters(format!(
                "Invalid datetime '{}', expected an ISO-8601 instant.",
                datetime
            ))
        })?;
        if earliest_departure <= now {
            return Err(AppError::InvalidSearchParameters(
                "Date and time has to be in the future.".to_string(),
            ));
        }

        Ok(Self {
            departure,
            arrival,
            earliest_departure,
        })
    }
}

/// Enumerate every itinerary from `query.departure` to `query.arrival`
/// whose first leg departs at or after the requested bound.
///
/// Each queue entry is a path of legs chained by location. A path is emitted
/// once its arrival location matches the target and keeps extending as a
/// prefix of longer itineraries until the hop limit. Result order is not
/// significant.
///
/// Any catalog failure aborts the search; partial results are never
/// returned.
pub async fn search<C: FlightCatalog>(
    catalog: &C,
    query: &SearchQuery,
) -> AppResult<Vec<Vec<flight::Model>>> {
    let mut itineraries = Vec::new();

    let mut frontier: VecDeque<Vec<flight::Model>> = catalog
        .flights_departing_from(&query.departure, query.earliest_departure)
        .await?
        .into_iter()
        .map(|root| vec![root])
        .collect();

    while let Some(path) = frontier.pop_front() {
        let Some(last) = path.last() else { continue };

        if last.arrival.eq_ignore_ascii_case(&query.arrival) {
            itineraries.push(path.clone());
        }

        if path.len() >= MAX_LEGS {
            continue;
        }

        // The previous arrival already dominates the search bound (legs
        // only ever move forward in time); the max keeps the invariant
        // explicit.
        let not_before = last.arrival_time.max(query.earliest_departure);
        for next in catalog
            .flights_departing_from(&last.arrival, not_before)
            .await?
        {
            let mut extended = path.clone();
            extended.push(next);
            frontier.push_back(extended);
        }
    }

    tracing::debug!(
        departure = %query.departure,
        arrival = %query.arrival,
        count = itineraries.len(),
        "itinerary search complete"
    );

    Ok(itineraries)
}
