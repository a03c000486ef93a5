//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: stores, session registry and service construction
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and the validating JSON extractor
//! - `errors.rs`: response envelope and error mapping

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use teamhub_auth::Action;
use teamhub_infra::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(config)?);
    let auth_state = middleware::AuthState {
        authenticator: services.authenticator.clone(),
    };

    // Admin routes: role gate applied before any handler runs.
    let admin = routes::admin::router().route_layer(axum::middleware::from_fn_with_state(
        Action::AdministerMembers,
        middleware::require_role,
    ));

    let api = routes::router().nest("/admin", admin);

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(auth_state, middleware::authenticate))
                .layer(Extension(services)),
        ))
}
