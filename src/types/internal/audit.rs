use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::types::internal::context::RequestContext;

/// Action kinds recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Create,
    Read,
    Update,
    Delete,
    Login,
    Logout,
    Signup,
    Booking,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::Signup => "SIGNUP",
            Self::Booking => "BOOKING",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(Self::Create),
            "READ" => Ok(Self::Read),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "LOGIN" => Ok(Self::Login),
            "LOGOUT" => Ok(Self::Logout),
            "SIGNUP" => Ok(Self::Signup),
            "BOOKING" => Ok(Self::Booking),
            other => Err(format!("unknown action kind: {}", other)),
        }
    }
}

/// Resource kinds the platform audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    User,
    Subadmin,
    Property,
    Mess,
    GamingZone,
    Booking,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Subadmin => "SUBADMIN",
            Self::Property => "PROPERTY",
            Self::Mess => "MESS",
            Self::GamingZone => "GAMING_ZONE",
            Self::Booking => "BOOKING",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Self::User),
            "SUBADMIN" => Ok(Self::Subadmin),
            "PROPERTY" => Ok(Self::Property),
            "MESS" => Ok(Self::Mess),
            "GAMING_ZONE" => Ok(Self::GamingZone),
            "BOOKING" => Ok(Self::Booking),
            other => Err(format!("unknown resource kind: {}", other)),
        }
    }
}

/// Outcome of a gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Success,
    Failed,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One activity record, fully assembled but not yet persisted.
///
/// Built via the fluent methods and handed to the recorder. The recorder
/// fills in the timestamp and row id at append time.
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub actor_id: Option<String>,
    pub action: ActionKind,
    pub resource_kind: ResourceKind,
    pub resource_id: Option<String>,
    pub status: ActionStatus,
    pub detail: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ActivityEntry {
    pub fn new(action: ActionKind, resource_kind: ResourceKind, status: ActionStatus) -> Self {
        Self {
            actor_id: None,
            action,
            resource_kind,
            resource_id: None,
            status,
            detail: None,
            ip_address: None,
            user_agent: None,
        }
    }

    pub fn actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    pub fn resource(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach a value that must be correlatable but never readable in the
    /// log (emails, phone numbers). Stored as a sha256 digest; identical
    /// inputs hash identically, so patterns remain visible.
    pub fn sensitive_detail(mut self, label: &str, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            let mut hasher = Sha256::new();
            hasher.update(json_value.to_string().as_bytes());
            let digest = hasher.finalize();
            self.detail = Some(format!("{}=sha256:{:x}", label, digest));
        }
        self
    }

    /// Copy ip address, user agent and actor from the request context.
    pub fn with_context(mut self, ctx: &RequestContext) -> Self {
        self.ip_address = ctx.ip_address.map(|ip| ip.to_string());
        self.user_agent = ctx.user_agent.clone();
        if self.actor_id.is_none() {
            self.actor_id = ctx.actor_id.clone();
        }
        self
    }
}

/// Filters for the activity reporting surface. Absent fields are no-ops;
/// present fields are ANDed together.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub action: Option<ActionKind>,
    pub resource_kind: Option<ResourceKind>,
    pub actor_id: Option<String>,
    /// Inclusive lower bound, epoch seconds
    pub start: Option<i64>,
    /// Inclusive upper bound, epoch seconds
    pub end: Option<i64>,
}
