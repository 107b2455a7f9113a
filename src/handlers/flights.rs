use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::catalog::DbCatalog;
use crate::entities::flight;
use crate::error::AppResult;
use crate::search::{self, SearchQuery};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub departure: String,
    pub arrival: String,
    pub datetime: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegResponse {
    pub flight_id: i32,
    pub departure: String,
    pub arrival: String,
    pub departure_time: DateTimeWithTimeZone,
    pub arrival_time: DateTimeWithTimeZone,
}

impl From<flight::Model> for LegResponse {
    fn from(flight: flight::Model) -> Self {
        Self {
            flight_id: flight.id,
            departure: flight.departure,
            arrival: flight.arrival,
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
        }
    }
}

/// Search multi-leg itineraries between two locations
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Vec<LegResponse>>>> {
    tracing::info!(
        departure = %params.departure,
        arrival = %params.arrival,
        datetime = %params.datetime,
        "Received search request"
    );

    let query = SearchQuery::parse(
        &params.departure,
        &params.arrival,
        &params.datetime,
        Utc::now().fixed_offset(),
    )?;

    let catalog = DbCatalog::new(state.db.clone());
    let itineraries = search::search(&catalog, &query).await?;
    tracing::info!("Found {} itineraries matching the criteria", itineraries.len());

    Ok(Json(
        itineraries
            .into_iter()
            .map(|path| path.into_iter().map(LegResponse::from).collect())
            .collect(),
    ))
}
