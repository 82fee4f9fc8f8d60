use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::helpers;
use crate::errors::ApiError;
use crate::services::{crypto, ActivityRecorder, ResourceGateway, TokenService};
use crate::stores::user_store::{SubadminBackend, SubadminDraft, SubadminPatch};
use crate::stores::UserStore;
use crate::types::dto::admin::{
    CreateSubadminRequest, SubadminListResponse, SubadminResponse, UpdateSubadminRequest,
};
use crate::types::dto::common::{CreatedResponse, MessageResponse};
use crate::types::internal::audit::{ActionKind, ActionStatus, ActivityEntry, ResourceKind};
use crate::types::internal::context::RequestContext;
use crate::types::internal::Action;
use crate::services::permission_evaluator;

/// Subadmin management API endpoints
pub struct AdminApi {
    users: Arc<UserStore>,
    tokens: Arc<TokenService>,
    recorder: Arc<ActivityRecorder>,
    subadmins: Arc<ResourceGateway<SubadminBackend>>,
}

impl AdminApi {
    pub fn new(
        users: Arc<UserStore>,
        tokens: Arc<TokenService>,
        recorder: Arc<ActivityRecorder>,
        subadmins: Arc<ResourceGateway<SubadminBackend>>,
    ) -> Self {
        Self {
            users,
            tokens,
            recorder,
            subadmins,
        }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Subadmin management
    Admin,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// Create a subadmin account owned by the acting principal
    #[oai(path = "/subadmins", method = "post", tag = "AdminTags::Admin")]
    async fn create_subadmin(
        &self,
        req: &Request,
        body: Json<CreateSubadminRequest>,
    ) -> Result<Json<CreatedResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.tokens);
        let principal = helpers::require_principal(&ctx, &self.users).await?;

        let email = body.email.trim();
        if email.is_empty() || body.password.is_empty() {
            return Err(ApiError::bad_request("email and password are required"));
        }

        let draft = SubadminDraft {
            email: email.to_string(),
            display_name: body.display_name.trim().to_string(),
            password_hash: crypto::hash_password(&body.password)?,
            permissions: body.permissions.into(),
        };

        let id = self.subadmins.create(&ctx, &principal, draft).await?;
        Ok(Json(CreatedResponse { id }))
    }

    /// List all subadmin accounts
    #[oai(path = "/subadmins", method = "get", tag = "AdminTags::Admin")]
    async fn list_subadmins(
        &self,
        req: &Request,
    ) -> Result<Json<SubadminListResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.tokens);
        let principal = helpers::require_principal(&ctx, &self.users).await?;

        if let Err(denied) = permission_evaluator::authorize(&principal, Action::Read, None) {
            self.recorder
                .record(
                    ActivityEntry::new(
                        ActionKind::Read,
                        ResourceKind::Subadmin,
                        ActionStatus::Failed,
                    )
                    .actor(&principal.id)
                    .detail(format!("denied: {}", denied))
                    .with_context(&ctx),
                )
                .await;
            return Err(denied.into());
        }

        let rows = self.users.list_subadmins().await?;
        Ok(Json(SubadminListResponse {
            subadmins: rows.into_iter().map(SubadminResponse::from).collect(),
        }))
    }

    /// Update a subadmin's profile, permissions, or active status
    #[oai(path = "/subadmins/:id", method = "put", tag = "AdminTags::Admin")]
    async fn update_subadmin(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateSubadminRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.tokens);
        let principal = helpers::require_principal(&ctx, &self.users).await?;

        let patch = SubadminPatch {
            display_name: body.display_name.clone(),
            permissions: body.permissions.map(Into::into),
            is_active: body.is_active,
        };

        self.subadmins.update(&ctx, &principal, &id.0, patch).await?;
        Ok(Json(MessageResponse {
            message: "Subadmin updated".to_string(),
        }))
    }

    /// Deactivate a subadmin account
    #[oai(path = "/subadmins/:id", method = "delete", tag = "AdminTags::Admin")]
    async fn delete_subadmin(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.tokens);
        let principal = helpers::require_principal(&ctx, &self.users).await?;

        self.subadmins.delete(&ctx, &principal, &id.0).await?;
        Ok(Json(MessageResponse {
            message: "Subadmin deactivated".to_string(),
        }))
    }
}
