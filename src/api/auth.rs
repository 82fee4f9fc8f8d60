use std::sync::Arc;

use poem::Request;
use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};

use crate::errors::ApiError;
use crate::services::{crypto, ActivityRecorder, TokenService};
use crate::stores::UserStore;
use crate::types::dto::auth::{LoginRequest, SignupRequest, TokenResponse};
use crate::types::dto::common::{CreatedResponse, MessageResponse};
use crate::types::internal::audit::{ActionKind, ActionStatus, ActivityEntry, ResourceKind};
use crate::types::internal::context::RequestContext;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Authentication API endpoints
pub struct AuthApi {
    users: Arc<UserStore>,
    tokens: Arc<TokenService>,
    recorder: Arc<ActivityRecorder>,
}

impl AuthApi {
    pub fn new(
        users: Arc<UserStore>,
        tokens: Arc<TokenService>,
        recorder: Arc<ActivityRecorder>,
    ) -> Self {
        Self {
            users,
            tokens,
            recorder,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new end-user account
    #[oai(path = "/signup", method = "post", tag = "AuthTags::Authentication")]
    async fn signup(
        &self,
        req: &Request,
        body: Json<SignupRequest>,
    ) -> Result<Json<CreatedResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.tokens);

        let email = body.email.trim();
        if email.is_empty() || body.password.is_empty() {
            self.record_failed_signup(&ctx, email).await;
            return Err(ApiError::bad_request("email and password are required"));
        }

        let password_hash = match crypto::hash_password(&body.password) {
            Ok(hash) => hash,
            Err(e) => {
                self.record_failed_signup(&ctx, email).await;
                return Err(e.into());
            }
        };
        let id = match self
            .users
            .create_user(email, body.display_name.trim(), &password_hash)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                self.record_failed_signup(&ctx, email).await;
                return Err(e.into());
            }
        };

        self.recorder
            .record(
                ActivityEntry::new(ActionKind::Signup, ResourceKind::User, ActionStatus::Success)
                    .actor(&id)
                    .resource(&id)
                    .sensitive_detail("email", email)
                    .with_context(&ctx),
            )
            .await;

        Ok(Json(CreatedResponse { id }))
    }

    /// Login with email and password to receive an access token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(
        &self,
        req: &Request,
        body: Json<LoginRequest>,
    ) -> Result<Json<TokenResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.tokens);
        let email = body.email.trim();

        let account = match self.users.find_by_email(email).await? {
            Some(account) => account,
            None => {
                self.record_failed_login(&ctx, email, None).await;
                return Err(ApiError::unauthorized("invalid credentials"));
            }
        };

        if !crypto::verify_password(&account.password_hash, &body.password)? {
            self.record_failed_login(&ctx, email, Some(&account.id)).await;
            return Err(ApiError::unauthorized("invalid credentials"));
        }

        if !account.is_active {
            self.record_failed_login(&ctx, email, Some(&account.id)).await;
            return Err(ApiError::unauthorized("account is deactivated"));
        }

        let principal = self
            .users
            .get_principal(&account.id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("unknown account"))?;
        let (token, claims) = self.tokens.issue_for(&principal)?;

        self.recorder
            .record(
                ActivityEntry::new(ActionKind::Login, ResourceKind::User, ActionStatus::Success)
                    .actor(&account.id)
                    .resource(&account.id)
                    .with_context(&ctx),
            )
            .await;

        Ok(Json(TokenResponse {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_at: claims.exp,
        }))
    }

    /// Logout the authenticated account
    ///
    /// Tokens are stateless; this records the logout in the activity log
    /// and relies on expiry for invalidation.
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(
        &self,
        req: &Request,
        auth: BearerAuth,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.tokens);
        let claims = self
            .tokens
            .validate(&auth.0.token)
            .map_err(|_| ApiError::unauthorized("invalid token"))?;

        self.recorder
            .record(
                ActivityEntry::new(ActionKind::Logout, ResourceKind::User, ActionStatus::Success)
                    .actor(&claims.sub)
                    .resource(&claims.sub)
                    .with_context(&ctx),
            )
            .await;

        Ok(Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }))
    }
}

impl AuthApi {
    async fn record_failed_signup(&self, ctx: &RequestContext, email: &str) {
        self.recorder
            .record(
                ActivityEntry::new(ActionKind::Signup, ResourceKind::User, ActionStatus::Failed)
                    .sensitive_detail("email", email)
                    .with_context(ctx),
            )
            .await;
    }

    async fn record_failed_login(
        &self,
        ctx: &RequestContext,
        email: &str,
        account_id: Option<&str>,
    ) {
        let mut entry =
            ActivityEntry::new(ActionKind::Login, ResourceKind::User, ActionStatus::Failed)
                .sensitive_detail("email", email)
                .with_context(ctx);
        if let Some(id) = account_id {
            entry = entry.actor(id);
        }
        self.recorder.record(entry).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_env;
    use poem::Request;

    fn empty_request() -> Request {
        Request::builder().finish()
    }

    #[tokio::test]
    async fn signup_then_login_round_trips() {
        let env = setup_test_env().await;
        let api = AuthApi::new(env.users.clone(), env.tokens.clone(), env.recorder.clone());

        let signup = api
            .signup(
                &empty_request(),
                Json(SignupRequest {
                    email: "renter@example.com".to_string(),
                    display_name: "Renter".to_string(),
                    password: "hunter2hunter2".to_string(),
                }),
            )
            .await
            .unwrap();
        assert!(!signup.id.is_empty());

        let login = api
            .login(
                &empty_request(),
                Json(LoginRequest {
                    email: "renter@example.com".to_string(),
                    password: "hunter2hunter2".to_string(),
                }),
            )
            .await
            .unwrap();
        assert_eq!(login.token_type, "Bearer");

        let claims = env.tokens.validate(&login.access_token).unwrap();
        assert_eq!(claims.sub, signup.id);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected_and_recorded() {
        let env = setup_test_env().await;
        let api = AuthApi::new(env.users.clone(), env.tokens.clone(), env.recorder.clone());

        api.signup(
            &empty_request(),
            Json(SignupRequest {
                email: "renter@example.com".to_string(),
                display_name: "Renter".to_string(),
                password: "hunter2hunter2".to_string(),
            }),
        )
        .await
        .unwrap();

        let result = api
            .login(
                &empty_request(),
                Json(LoginRequest {
                    email: "renter@example.com".to_string(),
                    password: "wrong-password".to_string(),
                }),
            )
            .await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));

        let records = env.activity_rows().await;
        assert!(records
            .iter()
            .any(|r| r.action == "LOGIN" && r.status == "FAILED"));
    }

    #[tokio::test]
    async fn duplicate_email_signup_conflicts() {
        let env = setup_test_env().await;
        let api = AuthApi::new(env.users.clone(), env.tokens.clone(), env.recorder.clone());

        let body = || {
            Json(SignupRequest {
                email: "renter@example.com".to_string(),
                display_name: "Renter".to_string(),
                password: "hunter2hunter2".to_string(),
            })
        };
        api.signup(&empty_request(), body()).await.unwrap();

        let result = api.signup(&empty_request(), body()).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));

        let records = env.activity_rows().await;
        let failed = records
            .iter()
            .find(|r| r.action == "SIGNUP" && r.status == "FAILED")
            .expect("rejected signup should be recorded");
        assert!(failed
            .detail
            .as_deref()
            .unwrap()
            .starts_with("email=sha256:"));
    }

    #[tokio::test]
    async fn signup_without_password_is_rejected_and_recorded() {
        let env = setup_test_env().await;
        let api = AuthApi::new(env.users.clone(), env.tokens.clone(), env.recorder.clone());

        let result = api
            .signup(
                &empty_request(),
                Json(SignupRequest {
                    email: "renter@example.com".to_string(),
                    display_name: "Renter".to_string(),
                    password: String::new(),
                }),
            )
            .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));

        let records = env.activity_rows().await;
        assert!(records
            .iter()
            .any(|r| r.action == "SIGNUP" && r.status == "FAILED"));
    }

    #[tokio::test]
    async fn login_records_hashed_email_not_plaintext() {
        let env = setup_test_env().await;
        let api = AuthApi::new(env.users.clone(), env.tokens.clone(), env.recorder.clone());

        let _ = api
            .login(
                &empty_request(),
                Json(LoginRequest {
                    email: "ghost@example.com".to_string(),
                    password: "whatever-pass".to_string(),
                }),
            )
            .await;

        let records = env.activity_rows().await;
        let failed = records
            .iter()
            .find(|r| r.action == "LOGIN" && r.status == "FAILED")
            .unwrap();
        let detail = failed.detail.as_deref().unwrap();
        assert!(detail.starts_with("email=sha256:"));
        assert!(!detail.contains("ghost@example.com"));
    }
}
