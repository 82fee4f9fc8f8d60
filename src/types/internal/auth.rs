use serde::{Deserialize, Serialize};

/// JWT claims for access tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id
    pub sub: String,
    /// Role tag at issue time; informational only. Authorization always
    /// reloads the principal, so a stale role here cannot grant anything.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Token id for audit correlation
    pub jti: String,
}
