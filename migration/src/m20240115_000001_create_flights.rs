use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Flight::Table)
                    .if_not_exists()
                    .col(pk_auto(Flight::Id))
                    .col(string(Flight::Departure).not_null())
                    .col(string(Flight::Arrival).not_null())
                    .col(timestamp_with_time_zone(Flight::DepartureTime).not_null())
                    .col(timestamp_with_time_zone(Flight::ArrivalTime).not_null())
                    .to_owned(),
            )
            .await?;

        // Search expands the graph by departure location and time window
        manager
            .create_index(
                Index::create()
                    .name("idx_flight_departure_time")
                    .table(Flight::Table)
                    .col(Flight::Departure)
                    .col(Flight::DepartureTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flight::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Flight {
    Table,
    Id,
    Departure,
    Arrival,
    DepartureTime,
    ArrivalTime,
}
