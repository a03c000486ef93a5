use axum::http::StatusCode;

use crate::app::errors::{json_ok, ApiResponse, ApiResult};
use crate::context::Caller;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET /api/whoami - Echo the authenticated context
pub async fn whoami(Caller(ctx): Caller) -> ApiResult {
    Ok(json_ok(StatusCode::OK, ApiResponse::ok("authenticated", ctx)))
}
