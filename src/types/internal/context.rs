use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use poem::Request;
use poem_openapi::auth::{Bearer, BearerAuthorization};
use uuid::Uuid;

use crate::services::TokenService;

/// Unique identifier for one request, threaded through logs and audit detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request context that flows through all layers.
///
/// Replaces the ambient current-user state the dashboards used to read:
/// every authorize/audit call receives the acting principal explicitly,
/// and this context only carries transport facts (ip, agent, actor id).
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub ip_address: Option<IpAddr>,
    pub user_agent: Option<String>,

    /// Principal id from a validated bearer token; None for anonymous
    /// requests and system operations.
    pub actor_id: Option<String>,
}

impl RequestContext {
    /// Context for operations the system performs on its own behalf.
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            request_id: RequestId(Uuid::new_v4()),
            ip_address: None,
            user_agent: Some(format!("system:{}", operation_name)),
            actor_id: None,
        }
    }

    /// Build a context from an incoming request.
    ///
    /// Extracts ip and user agent, and resolves the actor id from a bearer
    /// token when one is present and valid. Invalid or missing tokens leave
    /// actor_id as None; endpoints that require authentication reject that
    /// downstream.
    pub fn from_request(req: &Request, tokens: &Arc<TokenService>) -> Self {
        let actor_id = Self::extract_bearer(req)
            .and_then(|bearer| tokens.validate(&bearer.token).ok())
            .map(|claims| claims.sub);

        Self {
            request_id: RequestId(Uuid::new_v4()),
            ip_address: Self::extract_ip_address(req),
            user_agent: req.header("User-Agent").map(|ua| ua.to_string()),
            actor_id,
        }
    }

    fn extract_bearer(req: &Request) -> Option<Bearer> {
        Bearer::from_request(req).ok()
    }

    /// Checks X-Forwarded-For, X-Real-IP, then the remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                if let Ok(parsed) = ip.trim().parse() {
                    return Some(parsed);
                }
            }
        }

        if let Some(real_ip) = req.header("X-Real-IP") {
            if let Ok(parsed) = real_ip.parse() {
                return Some(parsed);
            }
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    pub fn with_actor_id(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }
}

#[cfg(test)]
impl Default for RequestContext {
    fn default() -> Self {
        Self {
            request_id: RequestId(Uuid::new_v4()),
            ip_address: None,
            user_agent: None,
            actor_id: None,
        }
    }
}
