use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Serialize;

use crate::entities::flight;
use crate::error::{AppError, AppResult};

/// Flight metadata joined into a capacity snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct FlightMeta {
    pub departure: String,
    pub arrival: String,
    pub date: String,
}

/// Read-only access to the flight schedule.
///
/// The schedule is owned elsewhere; this service only reads it. The search
/// engine expands the flight graph exclusively through this trait, which is
/// what lets it run against an in-memory fixture in tests.
#[allow(async_fn_in_trait)]
pub trait FlightCatalog: Send + Sync {
    /// All flights leaving `location` (case-insensitive) at or after
    /// `not_before`.
    async fn flights_departing_from(
        &self,
        location: &str,
        not_before: sea_orm::prelude::DateTimeWithTimeZone,
    ) -> AppResult<Vec<flight::Model>>;

    async fn flight_by_id(&self, id: i32) -> AppResult<flight::Model>;

    async fn flight_meta(&self, id: i32) -> AppResult<FlightMeta> {
        let flight = self.flight_by_id(id).await?;
        Ok(FlightMeta {
            departure: flight.departure,
            arrival: flight.arrival,
            date: flight.departure_time.date_naive().to_string(),
        })
    }
}

/// Catalog backed by the flights table.
#[derive(Clone)]
pub struct DbCatalog {
    db: DatabaseConnection,
}

impl DbCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl FlightCatalog for DbCatalog {
    async fn flights_departing_from(
        &self,
        location: &str,
        not_before: sea_orm::prelude::DateTimeWithTimeZone,
    ) -> AppResult<Vec<flight::Model>> {
        let flights = flight::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(flight::Column::Departure)))
                    .eq(location.to_lowercase()),
            )
            .filter(flight::Column::DepartureTime.gte(not_before))
            .all(&self.db)
            .await?;
        Ok(flights)
    }

    async fn flight_by_id(&self, id: i32) -> AppResult<flight::Model> {
        flight::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::FlightNotFound(id))
    }
}
