use std::net::SocketAddr;

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flight_booking_backend::{config::Config, db, entities::flight, routes, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flight_booking_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    tracing::info!("Starting server at {}", config.server_addr());

    // Connect to database
    let db = db::connect(&config)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database");

    // Run migrations
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Migrations complete");

    // Seed a demo schedule if the catalog is empty
    seed_flights(&db).await;

    // Create app state
    let state = AppState {
        db,
        config: config.clone(),
    };

    // Create router with middleware
    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server with socket address for rate limiting
    let addr: SocketAddr = config.server_addr().parse().expect("Invalid address");
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}

/// Seed a small flight schedule when the flights table is empty
async fn seed_flights(db: &sea_orm::DatabaseConnection) {
    let existing = flight::Entity::find()
        .one(db)
        .await
        .expect("Failed to check flight schedule");
    if existing.is_some() {
        return;
    }

    // Departure/arrival hours are offsets from midnight tomorrow (UTC)
    let schedule = [
        ("Amsterdam", "London", 8, 10),
        ("London", "New York", 11, 18),
        ("Amsterdam", "New York", 8, 12),
        ("London", "Paris", 9, 10),
        ("Paris", "Rome", 12, 14),
        ("New York", "Amsterdam", 20, 27),
    ];

    let midnight = (Utc::now() + Duration::days(1))
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc();

    for (departure, arrival, dep_hour, arr_hour) in schedule {
        let seeded = flight::ActiveModel {
            departure: Set(departure.to_string()),
            arrival: Set(arrival.to_string()),
            departure_time: Set((midnight + Duration::hours(dep_hour)).fixed_offset()),
            arrival_time: Set((midnight + Duration::hours(arr_hour)).fixed_offset()),
            ..Default::default()
        };
        seeded.insert(db).await.expect("Failed to seed flight");
    }

    tracing::info!("Seeded {} demo flights", schedule.len());
}
