use thiserror::Error;

use crate::errors::InternalError;
use crate::types::internal::audit::ResourceKind;

/// Authorization failure taxonomy surfaced synchronously to callers.
///
/// Every denial in the core maps to exactly one of these; nothing in the
/// authorization path panics or raises an opaque error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    /// Principal inactive or role has no business at the gateway (401)
    #[error("authentication required or account is inactive")]
    Unauthorized,

    /// Principal active and role-eligible, but the permission flag or
    /// ownership check failed (403)
    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    /// Target resource does not resolve; raised before authorization is
    /// attempted (404)
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}

impl AccessError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.as_str(),
            id: id.into(),
        }
    }
}

/// Error surface of the resource gateways.
///
/// `Internal` covers persistence failures after authorization succeeded;
/// audit-write failures never appear here, they are swallowed inside the
/// recorder with a warn log.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}
