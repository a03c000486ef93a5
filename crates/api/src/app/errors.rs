//! Uniform response envelope and error → status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use teamhub_auth::AuthzError;
use teamhub_core::{DomainError, ErrorKind};

/// `{ "success": bool, "message": string, "data"?: T }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

pub fn json_ok<T: Serialize>(status: StatusCode, body: ApiResponse<T>) -> Response {
    (status, axum::Json(body)).into_response()
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(ApiResponse::failure(message))).into_response()
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::DuplicateIdentity => StatusCode::CONFLICT,
        ErrorKind::IdentityNotFound | ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidCredential
        | ErrorKind::TokenInvalid
        | ErrorKind::TokenExpired
        | ErrorKind::SessionNotFound
        | ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::InvalidState | ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    let status = status_for(err.kind());

    let message = match err.kind() {
        ErrorKind::InternalError => {
            tracing::error!(error = %err, "request failed");
            ErrorKind::InternalError.default_message().to_string()
        }
        _ => err.message().to_string(),
    };

    json_error(status, message)
}

/// Handler error; renders through [`domain_error_to_response`].
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        domain_error_to_response(self.0)
    }
}

pub type ApiResult = Result<Response, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_maps_to_its_status() {
        let expected = [
            (ErrorKind::DuplicateIdentity, 409),
            (ErrorKind::IdentityNotFound, 404),
            (ErrorKind::InvalidCredential, 401),
            (ErrorKind::Forbidden, 403),
            (ErrorKind::TokenInvalid, 401),
            (ErrorKind::TokenExpired, 401),
            (ErrorKind::SessionNotFound, 401),
            (ErrorKind::InvalidState, 400),
            (ErrorKind::NotFound, 404),
            (ErrorKind::ValidationFailed, 400),
            (ErrorKind::Unauthenticated, 401),
            (ErrorKind::InternalError, 500),
        ];
        for (kind, status) in expected {
            assert_eq!(status_for(kind).as_u16(), status, "{kind:?}");
        }
    }

    #[test]
    fn envelope_omits_absent_data() {
        let body = serde_json::to_value(ApiResponse::failure("nope")).unwrap();
        assert_eq!(body, serde_json::json!({ "success": false, "message": "nope" }));

        let body = serde_json::to_value(ApiResponse::ok("fine", 7)).unwrap();
        assert_eq!(body["data"], 7);
        assert_eq!(body["success"], true);
    }

    #[test]
    fn internal_errors_are_not_echoed() {
        let res = domain_error_to_response(DomainError::internal("db password is hunter2"));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
