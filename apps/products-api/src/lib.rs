//! Products API
//!
//! A microservice managing a product catalog over REST.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (HTTP/JSON)
//! Axum router (api.rs)
//!   ↓
//! ProductService (domain layer)
//!   ↓ (business logic, filter dispatch)
//! PgProductRepository (persistence)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Modules
//!
//! - `server`: Server initialization and lifecycle
//! - `api`: Service-level routes (index, readiness)
//! - `openapi`: Combined OpenAPI documentation

pub mod api;
pub mod openapi;
pub mod server;

// Re-export for convenience
pub use server::run;
