//! Service-level routes: index and readiness

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use axum_helpers::server::run_health_checks;
use database::postgres::DatabaseConnection;
use serde_json::json;

/// Service index: a small self-description with pointers to the resources.
async fn index() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "name": "Product Catalog REST API Service",
            "version": env!("CARGO_PKG_VERSION"),
            "paths": {
                "products": "/products",
                "docs": "/swagger-ui"
            }
        })),
    )
}

/// Readiness probe: verifies the database answers a trivial query.
async fn ready(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    let checks = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&db)
                .await
                .map_err(|e| e.to_string())
        }) as axum_helpers::HealthCheckFuture<'_>,
    )];

    match run_health_checks(checks).await {
        Ok(response) => response.into_response(),
        Err(response) => response.into_response(),
    }
}

/// Routes owned by the app itself (the products resource comes from the
/// domain crate).
pub fn router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ready", get(ready))
        .with_state(db)
}
