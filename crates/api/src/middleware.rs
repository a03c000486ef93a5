use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use teamhub_auth::{authorize, require_authenticated, Action, AuthContext, RequestAuthenticator};

use crate::app::errors::ApiError;

#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<RequestAuthenticator>,
}

/// Attach an [`AuthContext`] when the bearer token is valid.
///
/// Never rejects: a missing, malformed, expired or forged token leaves the
/// request anonymous and lets the route decide.
pub async fn authenticate(State(state): State<AuthState>, mut req: Request, next: Next) -> Response {
    let ctx = state.authenticator.authenticate(extract_bearer(req.headers()));

    if let Some(ctx) = ctx {
        req.extensions_mut().insert(ctx);
    }

    next.run(req).await
}

/// Route-level gate: the caller must be authenticated and allowed `action`.
pub async fn require_role(State(action): State<Action>, req: Request, next: Next) -> Response {
    let checked = require_authenticated(req.extensions().get::<AuthContext>())
        .and_then(|ctx| authorize(ctx, action));

    if let Err(e) = checked {
        tracing::debug!(?action, error = %e, "route gate rejected request");
        return ApiError::from(e).into_response();
    }

    next.run(req).await
}

pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(auth: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        h
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer(&headers("Bearer   padded  ")), Some("padded"));
    }

    #[test]
    fn ignores_other_schemes_and_blank_tokens() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
        assert_eq!(extract_bearer(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(&headers("bearer abc")), None);
        assert_eq!(extract_bearer(&headers("Bearer ")), None);
    }
}
