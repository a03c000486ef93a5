//! Configuration loading and representation.
//!
//! Everything is read once from the environment at process start and is
//! immutable afterwards.

use std::net::SocketAddr;

use anyhow::{bail, Context};
use chrono::Duration;

use teamhub_auth::TokenTtls;

const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// HS256 keys shorter than this cannot carry 256 bits of entropy.
const MIN_SECRET_BYTES: usize = 32;

/// Credentials for an ADMIN account created at startup.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub use_persistent_stores: bool,
    pub redis_url: String,
    pub bootstrap_admin: Option<AdminBootstrap>,
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("use_persistent_stores", &self.use_persistent_stores)
            .field("redis_url", &self.redis_url)
            .field("bootstrap_admin", &self.bootstrap_admin)
            .finish()
    }
}

impl AppConfig {
    /// Defaults with the given secret; used by tests and embedding callers.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        let ttls = TokenTtls::default();
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            jwt_secret: jwt_secret.into(),
            access_token_ttl: ttls.access,
            refresh_token_ttl: ttls.refresh,
            use_persistent_stores: false,
            redis_url: "redis://localhost:6379".to_string(),
            bootstrap_admin: None,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };
        if jwt_secret.len() < MIN_SECRET_BYTES {
            tracing::warn!(
                "JWT_SECRET is shorter than {MIN_SECRET_BYTES} bytes; tokens are weakly protected"
            );
        }

        let mut config = Self::with_secret(jwt_secret);

        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("BIND_ADDR is not a socket address: {addr}"))?;
        }
        if let Some(v) = get("ACCESS_TOKEN_TTL_SECS") {
            config.access_token_ttl = parse_ttl("ACCESS_TOKEN_TTL_SECS", &v)?;
        }
        if let Some(v) = get("REFRESH_TOKEN_TTL_SECS") {
            config.refresh_token_ttl = parse_ttl("REFRESH_TOKEN_TTL_SECS", &v)?;
        }
        if let Some(v) = get("USE_PERSISTENT_STORES") {
            config.use_persistent_stores = v
                .trim()
                .parse::<bool>()
                .with_context(|| format!("USE_PERSISTENT_STORES must be true or false, got {v}"))?;
        }
        if let Some(url) = get("REDIS_URL") {
            config.redis_url = url;
        }

        config.bootstrap_admin = match (get("ADMIN_EMAIL"), get("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminBootstrap { email, password }),
            (None, None) => None,
            _ => bail!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together"),
        };

        Ok(config)
    }

    pub fn token_ttls(&self) -> TokenTtls {
        TokenTtls {
            access: self.access_token_ttl,
            refresh: self.refresh_token_ttl,
        }
    }
}

fn parse_ttl(key: &str, value: &str) -> anyhow::Result<Duration> {
    let secs: u32 = value
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number of seconds, got {value}"))?;
    if secs == 0 {
        bail!("{key} must be positive");
    }
    Ok(Duration::seconds(i64::from(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(config.access_token_ttl, Duration::minutes(30));
        assert_eq!(config.refresh_token_ttl, Duration::days(7));
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(!config.use_persistent_stores);
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("JWT_SECRET", "0123456789abcdef0123456789abcdef"),
            ("ACCESS_TOKEN_TTL_SECS", "60"),
            ("REFRESH_TOKEN_TTL_SECS", "3600"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("USE_PERSISTENT_STORES", "true"),
            ("REDIS_URL", "redis://cache:6379"),
            ("ADMIN_EMAIL", "root@x.com"),
            ("ADMIN_PASSWORD", "password1"),
        ])
        .unwrap();

        assert_eq!(config.token_ttls().access, Duration::seconds(60));
        assert_eq!(config.token_ttls().refresh, Duration::hours(1));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");
        assert!(config.use_persistent_stores);
        assert_eq!(config.redis_url, "redis://cache:6379");
        assert_eq!(config.bootstrap_admin.unwrap().email, "root@x.com");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(load(&[("ACCESS_TOKEN_TTL_SECS", "soon")]).is_err());
        assert!(load(&[("REFRESH_TOKEN_TTL_SECS", "0")]).is_err());
        assert!(load(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(load(&[("ADMIN_EMAIL", "root@x.com")]).is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = load(&[
            ("JWT_SECRET", "super-secret-super-secret-super-secret"),
            ("ADMIN_EMAIL", "root@x.com"),
            ("ADMIN_PASSWORD", "hunter2hunter2"),
        ])
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("hunter2"));
    }
}
