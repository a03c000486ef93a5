use core::str::FromStr;

use serde::{Deserialize, Serialize};

use teamhub_core::DomainError;

/// Member role. Closed set; authorization checks match on it exhaustively.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Leader,
    Member,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Leader, Role::Member];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Leader => "LEADER",
            Role::Member => "MEMBER",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "LEADER" => Ok(Role::Leader),
            "MEMBER" => Ok(Role::Member),
            other => Err(DomainError::validation(
                "role",
                format!("unknown role '{other}'"),
            )),
        }
    }
}
