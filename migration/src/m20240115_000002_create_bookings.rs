use sea_orm_migration::{prelude::*, schema::*};

use super::m20240115_000001_create_flights::Flight;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::FlightId).not_null())
                    .col(string(Booking::SeatNumber).not_null())
                    .col(double(Booking::Price).not_null())
                    .col(boolean(Booking::Luggage).not_null())
                    .col(boolean(Booking::Meal).not_null())
                    .col(string(Booking::FareClass).not_null())
                    .col(string(Booking::CustomerEmail).not_null())
                    .col(string_null(Booking::CustomerName))
                    .col(boolean_null(Booking::Paid))
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_flight")
                            .from(Booking::Table, Booking::FlightId)
                            .to(Flight::Table, Flight::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One booking per seat per flight. Concurrent reservations race on
        // this index; the loser's insert fails with a unique violation.
        manager
            .create_index(
                Index::create()
                    .name("uq_booking_flight_seat")
                    .table(Booking::Table)
                    .col(Booking::FlightId)
                    .col(Booking::SeatNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    FlightId,
    SeatNumber,
    Price,
    Luggage,
    Meal,
    FareClass,
    CustomerEmail,
    CustomerName,
    Paid,
    CreatedAt,
}
