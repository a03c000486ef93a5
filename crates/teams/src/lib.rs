//! `teamhub-teams`: teams, invite codes and membership rules.

pub mod service;
pub mod team;

pub use service::{TeamMemberView, TeamService, TeamView};
pub use team::{generate_invite_code, NewTeam, Team, TeamStore, INVITE_CODE_LEN};
