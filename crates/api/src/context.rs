use axum::{extract::FromRequestParts, http::request::Parts};

use teamhub_auth::{require_authenticated, AuthContext};

use crate::app::errors::ApiError;

/// The authenticated caller of a request.
///
/// The authentication middleware never rejects; it only attaches an
/// [`AuthContext`] when the bearer token checks out. Handlers that need a
/// caller take this extractor, which turns an anonymous request into
/// `Unauthenticated`.
#[derive(Debug, Clone)]
pub struct Caller(pub AuthContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = require_authenticated(parts.extensions.get::<AuthContext>())?;
        Ok(Caller(ctx.clone()))
    }
}
