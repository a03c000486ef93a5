//! Service wiring: stores, session registry backend, token codec, services.

use std::sync::Arc;

use teamhub_auth::{
    Argon2Hasher, AuthService, MemberStore, RequestAuthenticator, Role, SessionRegistry, SignUp,
    TokenCodec,
};
use teamhub_core::{Clock, SystemClock};
use teamhub_infra::{AdminBootstrap, AppConfig, InMemoryMemberStore, InMemorySessionRegistry, InMemoryTeamStore};
use teamhub_teams::TeamService;

#[derive(Clone)]
pub struct AppServices {
    pub auth: AuthService,
    pub teams: TeamService,
    pub members: Arc<dyn MemberStore>,
    pub authenticator: Arc<RequestAuthenticator>,
}

pub fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let members: Arc<dyn MemberStore> = Arc::new(InMemoryMemberStore::new());
    let team_store = Arc::new(InMemoryTeamStore::new());
    let sessions = build_session_registry(config, clock.clone())?;

    let tokens = TokenCodec::new(config.jwt_secret.as_bytes(), config.token_ttls(), clock.clone());
    let authenticator = Arc::new(RequestAuthenticator::new(Arc::new(tokens.clone())));

    let auth = AuthService::new(
        members.clone(),
        sessions,
        Arc::new(Argon2Hasher::default()),
        tokens,
        clock.clone(),
    );
    let teams = TeamService::new(team_store, members.clone(), clock);

    if let Some(admin) = &config.bootstrap_admin {
        bootstrap_admin(&auth, members.as_ref(), admin)?;
    }

    Ok(AppServices {
        auth,
        teams,
        members,
        authenticator,
    })
}

fn build_session_registry(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<Arc<dyn SessionRegistry>> {
    if config.use_persistent_stores {
        #[cfg(feature = "redis")]
        {
            tracing::info!(redis_url = %config.redis_url, "using redis session registry");
            let registry = teamhub_infra::RedisSessionRegistry::new(&config.redis_url)?;
            return Ok(Arc::new(registry));
        }
        #[cfg(not(feature = "redis"))]
        {
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but redis feature not enabled, falling back to in-memory"
            );
        }
    }

    Ok(Arc::new(InMemorySessionRegistry::new(clock)))
}

fn bootstrap_admin(
    auth: &AuthService,
    members: &dyn MemberStore,
    admin: &AdminBootstrap,
) -> anyhow::Result<()> {
    if members.exists_by_identity(&admin.email)? {
        tracing::info!("bootstrap admin already present");
        return Ok(());
    }

    let member = auth.sign_up(SignUp {
        email: admin.email.clone(),
        password: admin.password.clone(),
        name: "Administrator".to_string(),
        role: Role::Admin,
    })?;

    tracing::info!(member_id = %member.id, "bootstrap admin created");
    Ok(())
}
