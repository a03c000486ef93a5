//! Team creation, joins and read endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::StatusCode,
    routing::{get, post},
    Router,
};

use teamhub_core::{DomainError, TeamId, Validate};

use crate::app::dto::{JoinQuery, TeamCreateRequest, ValidJson};
use crate::app::errors::{json_ok, ApiResponse, ApiResult};
use crate::app::services::AppServices;
use crate::context::Caller;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_team))
        .route("/my", get(my_teams))
        .route("/join", post(join_team))
        .route("/:team_id/members", get(team_members))
}

/// POST /api/teams - LEADER only
pub async fn create_team(
    Extension(services): Extension<Arc<AppServices>>,
    Caller(ctx): Caller,
    ValidJson(body): ValidJson<TeamCreateRequest>,
) -> ApiResult {
    let team = services.teams.create_team(&ctx, &body.name)?;
    Ok(json_ok(StatusCode::CREATED, ApiResponse::ok("team created", team)))
}

/// GET /api/teams/my
pub async fn my_teams(Extension(services): Extension<Arc<AppServices>>, Caller(ctx): Caller) -> ApiResult {
    let teams = services.teams.my_teams(&ctx)?;
    Ok(json_ok(StatusCode::OK, ApiResponse::ok("teams", teams)))
}

/// POST /api/teams/join?inviteCode=... - MEMBER only
pub async fn join_team(
    Extension(services): Extension<Arc<AppServices>>,
    Caller(ctx): Caller,
    query: Result<Query<JoinQuery>, QueryRejection>,
) -> ApiResult {
    let Query(query) = query.map_err(|r| DomainError::validation("inviteCode", r.body_text()))?;
    query.validate()?;

    let team = services.teams.join_team(&ctx, &query.invite_code)?;
    Ok(json_ok(StatusCode::OK, ApiResponse::ok("joined team", team)))
}

/// GET /api/teams/:team_id/members - the team's own leader only
pub async fn team_members(
    Extension(services): Extension<Arc<AppServices>>,
    Caller(ctx): Caller,
    Path(team_id): Path<String>,
) -> ApiResult {
    let team_id: TeamId = team_id.parse()?;
    let members = services.teams.team_members(&ctx, team_id)?;
    Ok(json_ok(StatusCode::OK, ApiResponse::ok("team members", members)))
}
