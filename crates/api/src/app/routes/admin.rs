//! Administrative views. Mounted behind the ADMIN route gate.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, routing::get, Router};

use teamhub_auth::MemberSummary;

use crate::app::errors::{json_ok, ApiResponse, ApiResult};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/members", get(list_members))
}

/// GET /api/admin/members
pub async fn list_members(Extension(services): Extension<Arc<AppServices>>) -> ApiResult {
    let members: Vec<MemberSummary> = services
        .members
        .list()?
        .iter()
        .map(MemberSummary::from)
        .collect();
    Ok(json_ok(StatusCode::OK, ApiResponse::ok("members", members)))
}
