//! Request authenticator: bearer token → optional [`AuthContext`].
//!
//! Token failures are swallowed here. A request with a missing, expired or
//! invalid token proceeds as anonymous; whichever authorization check runs
//! next decides whether anonymous access is acceptable.

use std::sync::Arc;

use crate::{AuthContext, TokenVerifier};

#[derive(Clone)]
pub struct RequestAuthenticator {
    verifier: Arc<dyn TokenVerifier>,
}

impl RequestAuthenticator {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    pub fn authenticate(&self, bearer: Option<&str>) -> Option<AuthContext> {
        let token = bearer?;
        match self.verifier.parse_access(token) {
            Ok((verified, role)) => Some(AuthContext::new(verified.identity, role)),
            Err(e) => {
                tracing::debug!("bearer token rejected, continuing as anonymous: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, TokenCodec, TokenTtls};
    use chrono::Duration;
    use teamhub_core::ManualClock;

    fn setup() -> (RequestAuthenticator, TokenCodec, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_now());
        let codec = TokenCodec::new(b"authenticator-test-secret-0123456789", TokenTtls::default(), clock.clone());
        (RequestAuthenticator::new(Arc::new(codec.clone())), codec, clock)
    }

    #[test]
    fn valid_access_token_establishes_context() {
        let (auth, codec, _) = setup();
        let token = codec.issue_access("a@x.com", Role::Leader).unwrap();

        let ctx = auth.authenticate(Some(&token)).unwrap();
        assert_eq!(ctx, AuthContext::new("a@x.com", Role::Leader));
    }

    #[test]
    fn missing_token_is_anonymous() {
        let (auth, _, _) = setup();
        assert_eq!(auth.authenticate(None), None);
    }

    #[test]
    fn bad_tokens_degrade_to_anonymous() {
        let (auth, codec, clock) = setup();

        assert_eq!(auth.authenticate(Some("not-a-token")), None);

        let refresh = codec.issue_refresh("a@x.com").unwrap();
        assert_eq!(auth.authenticate(Some(&refresh)), None);

        let access = codec.issue_access("a@x.com", Role::Member).unwrap();
        clock.advance(Duration::hours(1));
        assert_eq!(auth.authenticate(Some(&access)), None);
    }
}
