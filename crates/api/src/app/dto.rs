//! Request DTOs and the validating JSON extractor.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};

use teamhub_auth::{Role, SignUp};
use teamhub_core::{Check, DomainError, FieldRule, Validate};

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    pub role: Option<Role>,
}

impl Validate for SignUpRequest {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![
            FieldRule::new("email", Check::NotBlank(&self.email), "must not be blank"),
            FieldRule::new("email", Check::Email(&self.email), "must be a well-formed email address"),
            FieldRule::new("password", Check::NotBlank(&self.password), "must not be blank"),
            FieldRule::new("password", Check::MinChars(&self.password, 8), "must be at least 8 characters"),
            FieldRule::new("name", Check::NotBlank(&self.name), "must not be blank"),
            FieldRule::new("role", Check::Present(self.role.is_some()), "must not be null"),
            FieldRule::new(
                "role",
                Check::Holds(self.role != Some(Role::Admin)),
                "ADMIN cannot be self-assigned",
            ),
        ]
    }
}

impl SignUpRequest {
    /// Call after [`Validate::validate`] has passed.
    pub fn into_command(self) -> Result<SignUp, DomainError> {
        let role = self
            .role
            .ok_or_else(|| DomainError::validation("role", "must not be null"))?;
        Ok(SignUp {
            email: self.email.trim().to_string(),
            password: self.password,
            name: self.name.trim().to_string(),
            role,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![
            FieldRule::new("email", Check::NotBlank(&self.email), "must not be blank"),
            FieldRule::new("password", Check::NotBlank(&self.password), "must not be blank"),
        ]
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamCreateRequest {
    #[serde(default)]
    pub name: String,
}

impl Validate for TeamCreateRequest {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![FieldRule::new("name", Check::NotBlank(&self.name), "must not be blank")]
    }
}

#[derive(Debug, Deserialize)]
pub struct JoinQuery {
    #[serde(rename = "inviteCode", default)]
    pub invite_code: String,
}

impl Validate for JoinQuery {
    fn rules(&self) -> Vec<FieldRule<'_>> {
        vec![FieldRule::new("inviteCode", Check::NotBlank(&self.invite_code), "must not be blank")]
    }
}

// -------------------------
// Extractor
// -------------------------

/// JSON body that has been deserialized and passed its [`Validate`] rules.
///
/// Unparsable bodies and rule violations both surface as `ValidationFailed`.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| DomainError::validation("body", rejection.body_text()))?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamhub_core::ErrorKind;

    fn sign_up(body: serde_json::Value) -> SignUpRequest {
        serde_json::from_value(body).unwrap()
    }

    fn failure(v: &impl Validate) -> String {
        let err = v.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        err.message().to_string()
    }

    #[test]
    fn valid_sign_up_passes() {
        let req = sign_up(serde_json::json!({
            "email": "alice@x.com", "password": "password1", "name": "Alice", "role": "LEADER"
        }));
        req.validate().unwrap();
        let cmd = req.into_command().unwrap();
        assert_eq!(cmd.role, Role::Leader);
    }

    #[test]
    fn first_failing_rule_is_reported() {
        let req = sign_up(serde_json::json!({ "email": "", "password": "short" }));
        assert_eq!(failure(&req), "email: must not be blank");

        let req = sign_up(serde_json::json!({ "email": "not-an-email", "password": "short" }));
        assert_eq!(failure(&req), "email: must be a well-formed email address");

        let req = sign_up(serde_json::json!({ "email": "a@x.com", "password": "short" }));
        assert_eq!(failure(&req), "password: must be at least 8 characters");

        let req = sign_up(serde_json::json!({ "email": "a@x.com", "password": "password1", "name": "A" }));
        assert_eq!(failure(&req), "role: must not be null");
    }

    #[test]
    fn admin_cannot_sign_up() {
        let req = sign_up(serde_json::json!({
            "email": "root@x.com", "password": "password1", "name": "Root", "role": "ADMIN"
        }));
        assert_eq!(failure(&req), "role: ADMIN cannot be self-assigned");
    }

    #[test]
    fn join_query_reads_camel_case_parameter() {
        let q: JoinQuery = serde_json::from_value(serde_json::json!({ "inviteCode": "AB12CD34" })).unwrap();
        q.validate().unwrap();
        assert_eq!(q.invite_code, "AB12CD34");

        let q: JoinQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(failure(&q), "inviteCode: must not be blank");
    }
}
