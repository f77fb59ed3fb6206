//! Server initialization and lifecycle management
//!
//! This module handles all server setup:
//! - Tracing initialization
//! - Database connection with retry
//! - Migrations
//! - Router assembly and startup with graceful shutdown

use axum::Router;
use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{app_info, server::ServerConfig, Environment, FromEnv};
use database::postgres::PostgresConfig;
use domain_products::{handlers, PgProductRepository, ProductService};
use eyre::WrapErr;
use migration::Migrator;
use tracing::info;

use crate::api;
use crate::openapi::ApiDoc;

/// Run the REST server
///
/// This is the main entry point for server initialization. It:
/// 1. Sets up structured logging (env-aware: JSON for prod, pretty for dev)
/// 2. Connects to the database with retry logic and runs migrations
/// 3. Creates the repository and service layers
/// 4. Starts the HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database configuration is invalid
/// - Database connection or migration fails
/// - Server binding fails
/// - Server runtime encounters an error
pub async fn run() -> eyre::Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    // Load configuration from environment
    let config = PostgresConfig::from_env().wrap_err("Failed to load database configuration")?;
    let server_config = ServerConfig::from_env().wrap_err("Failed to load server configuration")?;

    // Connect with retry, then bring the schema up to date
    info!("Connecting to database...");
    let db = database::postgres::connect_from_config_with_retry(config, None)
        .await
        .wrap_err("Failed to connect to database")?;
    info!("Connected to database successfully");

    database::postgres::run_migrations::<Migrator>(&db, "products_api")
        .await
        .wrap_err("Failed to run migrations")?;

    // Create repository and service layers
    let repository = PgProductRepository::new(db.clone());
    let service = ProductService::new(repository);

    // Assemble the router: products resource, service routes, docs, health
    let api_routes = Router::new()
        .nest("/products", handlers::router(service))
        .merge(api::router(db));

    let router = create_router::<ApiDoc>(api_routes)
        .await
        .wrap_err("Failed to build router")?;
    let app = router.merge(health_router(app_info!()));

    info!("Starting Products API on {}", server_config.address());

    create_app(app, &server_config)
        .await
        .wrap_err("Server error")?;

    info!("Products API shutdown complete");
    Ok(())
}
