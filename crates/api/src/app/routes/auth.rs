//! Sign-up, login, token reissue and logout.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};

use teamhub_core::DomainError;

use crate::app::dto::{LoginRequest, SignUpRequest, ValidJson};
use crate::app::errors::{json_ok, ApiResponse, ApiResult};
use crate::app::services::AppServices;
use crate::context::Caller;

/// Header carrying the refresh token on reissue.
pub const REFRESH_TOKEN_HEADER: &str = "Refresh-Token";

pub fn router() -> Router {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/login", post(login))
        .route("/reissue", post(reissue))
        .route("/logout", post(logout))
}

/// POST /api/auth/signup
pub async fn sign_up(
    Extension(services): Extension<Arc<AppServices>>,
    ValidJson(body): ValidJson<SignUpRequest>,
) -> ApiResult {
    services.auth.sign_up(body.into_command()?)?;
    Ok(json_ok(StatusCode::CREATED, ApiResponse::ok_empty("signed up")))
}

/// POST /api/auth/login
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    ValidJson(body): ValidJson<LoginRequest>,
) -> ApiResult {
    let pair = services.auth.login(body.email.trim(), &body.password)?;
    Ok(json_ok(StatusCode::OK, ApiResponse::ok("logged in", pair)))
}

/// POST /api/auth/reissue - refresh token in the `Refresh-Token` header
pub async fn reissue(Extension(services): Extension<Arc<AppServices>>, headers: HeaderMap) -> ApiResult {
    let refresh_token = headers
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::validation(REFRESH_TOKEN_HEADER, "header is required"))?;

    let pair = services.auth.reissue(refresh_token)?;
    Ok(json_ok(StatusCode::OK, ApiResponse::ok("token reissued", pair)))
}

/// POST /api/auth/logout
pub async fn logout(Extension(services): Extension<Arc<AppServices>>, Caller(ctx): Caller) -> ApiResult {
    services.auth.logout(ctx.identity())?;
    Ok(json_ok(StatusCode::OK, ApiResponse::ok_empty("logged out")))
}
