use axum::{routing::get, Router};

pub mod admin;
pub mod auth;
pub mod system;
pub mod teams;

/// Router for everything under `/api` except the role-gated admin tree.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/auth", auth::router())
        .nest("/teams", teams::router())
}
