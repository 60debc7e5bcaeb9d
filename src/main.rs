//! Biblos Server - Library Catalog
//!
//! Serves the catalog's list/detail pages, CRUD forms and the loan-renewal
//! workflow as template-identifier + context responses.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblos_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblos_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblos Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, &config.catalog);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Index
        .route("/catalog/", get(api::index::index))
        // Authors
        .route("/catalog/authors/", get(api::authors::list_authors))
        .route(
            "/catalog/author/create/",
            get(api::authors::create_author_form).post(api::authors::create_author),
        )
        .route("/catalog/author/:id", get(api::authors::get_author))
        .route(
            "/catalog/author/:id/update/",
            get(api::authors::update_author_form).post(api::authors::update_author),
        )
        .route(
            "/catalog/author/:id/delete/",
            get(api::authors::delete_author_form).post(api::authors::delete_author),
        )
        // Books
        .route("/catalog/books/", get(api::books::list_books))
        .route(
            "/catalog/book/create/",
            get(api::books::create_book_form).post(api::books::create_book),
        )
        .route("/catalog/book/:id", get(api::books::get_book))
        .route(
            "/catalog/book/:id/update/",
            get(api::books::update_book_form).post(api::books::update_book),
        )
        .route(
            "/catalog/book/:id/delete/",
            get(api::books::delete_book_form).post(api::books::delete_book),
        )
        // Borrowed copies and renewals
        .route("/catalog/mybooks/", get(api::instances::my_borrowed))
        .route("/catalog/borrowedbooks/", get(api::instances::all_borrowed))
        .route(
            "/catalog/book/:id/renew/",
            get(api::instances::renew_form).post(api::instances::renew),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(catalog)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
