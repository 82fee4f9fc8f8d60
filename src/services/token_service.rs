use std::fmt;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::errors::internal::CryptoError;
use crate::errors::InternalError;
use crate::types::internal::auth::Claims;
use crate::types::internal::{Principal, Role};

/// Issues and validates HS256 access tokens.
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_minutes: i64,
}

impl TokenService {
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_minutes: 60,
        }
    }

    /// Issue a token for the given principal. The embedded role is
    /// informational; authorization reloads the principal on every call.
    pub fn issue(&self, principal_id: &str, role: Role) -> Result<(String, Claims), InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: principal_id.to_string(),
            role: role.as_str().to_string(),
            exp: now + self.jwt_expiration_minutes * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| CryptoError::Token {
            operation: "issue".to_string(),
            message: e.to_string(),
        })?;

        Ok((token, claims))
    }

    pub fn issue_for(&self, principal: &Principal) -> Result<(String, Claims), InternalError> {
        self.issue(&principal.id, principal.role)
    }

    /// Validate a token and return its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, InternalError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| CryptoError::Token {
            operation: "validate".to_string(),
            message: e.to_string(),
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let service = TokenService::new("test-secret-key-minimum-32-characters-long".to_string());
        let (token, issued) = service.issue("u1", Role::Subadmin).unwrap();

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.role, "subadmin");
        assert_eq!(claims.jti, issued.jti);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = TokenService::new("test-secret-key-minimum-32-characters-long".to_string());
        assert!(service.validate("not-a-token").is_err());
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let issuer = TokenService::new("secret-one-minimum-32-characters-long-x".to_string());
        let verifier = TokenService::new("secret-two-minimum-32-characters-long-x".to_string());
        let (token, _) = issuer.issue("u1", Role::Admin).unwrap();
        assert!(verifier.validate(&token).is_err());
    }
}
