use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role of an authenticated actor.
///
/// End-users never reach the admin gateways; the role exists here so the
/// evaluator can reject them uniformly if a gateway is ever called with one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Subadmin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Subadmin => "subadmin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "subadmin" => Ok(Self::Subadmin),
            "user" => Ok(Self::User),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A gated action. Only the four CRUD verbs flow through authorization;
/// session actions (login/logout/signup) are recorded but never authorized
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// The fixed-shape permission vector carried by every principal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionSet {
    pub can_create: bool,
    pub can_read: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

impl PermissionSet {
    /// All four flags set. Conventional grant for admin accounts; the
    /// evaluator still checks the individual flag per action.
    pub fn all() -> Self {
        Self {
            can_create: true,
            can_read: true,
            can_update: true,
            can_delete: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Create => self.can_create,
            Action::Read => self.can_read,
            Action::Update => self.can_update,
            Action::Delete => self.can_delete,
        }
    }
}

/// An authenticated actor as seen by the authorization core.
///
/// Always loaded fresh from the identity store per request; never derived
/// from token claims alone, so revoked permissions and deactivation take
/// effect immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: String,
    pub role: Role,
    pub permissions: PermissionSet,
    pub is_active: bool,
}
