//! `teamhub-auth`: authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the credential
//! store and session registry are traits implemented by `teamhub-infra`.

pub mod authenticator;
pub mod authorize;
pub mod claims;
pub mod member;
pub mod password;
pub mod principal;
pub mod roles;
pub mod service;
pub mod session;
pub mod token;

pub use authenticator::RequestAuthenticator;
pub use authorize::{authorize, permits, require_authenticated, Action, AuthzError};
pub use claims::{validate_claims, TokenClaims, TokenValidationError, VerifiedToken};
pub use member::{Member, MemberStore, MemberSummary, NewMember};
pub use password::{Argon2Hasher, PasswordHasher};
pub use principal::AuthContext;
pub use roles::Role;
pub use service::{AuthService, SignUp, TokenPair};
pub use session::{session_key, SessionRegistry, SESSION_KEY_PREFIX};
pub use token::{TokenCodec, TokenTtls, TokenVerifier};
