use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::helpers;
use crate::errors::ApiError;
use crate::services::permission_evaluator;
use crate::services::{ActivityRecorder, ResourceGateway, TokenService};
use crate::stores::gaming_zone_store::{GamingZoneDraft, GamingZonePatch};
use crate::stores::mess_store::{MessDraft, MessPatch};
use crate::stores::property_store::{PropertyDraft, PropertyPatch};
use crate::stores::{GamingZoneStore, MessStore, PropertyStore, UserStore};
use crate::types::dto::common::{CreatedResponse, MessageResponse};
use crate::types::dto::listings::{
    CreateGamingZoneRequest, CreateMessRequest, CreatePropertyRequest, GamingZoneResponse,
    MessResponse, PropertyResponse, UpdateGamingZoneRequest, UpdateMessRequest,
    UpdatePropertyRequest,
};
use crate::types::internal::audit::{ActionKind, ActionStatus, ActivityEntry, ResourceKind};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{Action, Principal};

/// Listing management API endpoints for the three listing kinds.
///
/// Each kind routes through its own gateway; reads go straight to the
/// store after a flag check since reads are not ownership-gated.
pub struct ListingsApi {
    users: Arc<UserStore>,
    tokens: Arc<TokenService>,
    recorder: Arc<ActivityRecorder>,
    properties: Arc<ResourceGateway<PropertyStore>>,
    property_reader: Arc<PropertyStore>,
    messes: Arc<ResourceGateway<MessStore>>,
    mess_reader: Arc<MessStore>,
    gaming_zones: Arc<ResourceGateway<GamingZoneStore>>,
    gaming_zone_reader: Arc<GamingZoneStore>,
}

impl ListingsApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<UserStore>,
        tokens: Arc<TokenService>,
        recorder: Arc<ActivityRecorder>,
        properties: Arc<ResourceGateway<PropertyStore>>,
        property_reader: Arc<PropertyStore>,
        messes: Arc<ResourceGateway<MessStore>>,
        mess_reader: Arc<MessStore>,
        gaming_zones: Arc<ResourceGateway<GamingZoneStore>>,
        gaming_zone_reader: Arc<GamingZoneStore>,
    ) -> Self {
        Self {
            users,
            tokens,
            recorder,
            properties,
            property_reader,
            messes,
            mess_reader,
            gaming_zones,
            gaming_zone_reader,
        }
    }

    async fn authenticate(&self, req: &Request) -> Result<(RequestContext, Principal), ApiError> {
        let ctx = RequestContext::from_request(req, &self.tokens);
        let principal = helpers::require_principal(&ctx, &self.users).await?;
        Ok((ctx, principal))
    }

    /// Flag check for the read endpoints. Denials are recorded FAILED like
    /// gateway denials; successful reads are not recorded.
    async fn check_read(
        &self,
        ctx: &RequestContext,
        principal: &Principal,
        kind: ResourceKind,
    ) -> Result<(), ApiError> {
        if let Err(denied) = permission_evaluator::authorize(principal, Action::Read, None) {
            self.recorder
                .record(
                    ActivityEntry::new(ActionKind::Read, kind, ActionStatus::Failed)
                        .actor(&principal.id)
                        .detail(format!("denied: {}", denied))
                        .with_context(ctx),
                )
                .await;
            return Err(denied.into());
        }
        Ok(())
    }
}

/// API tags for listing endpoints
#[derive(Tags)]
enum ListingTags {
    /// Rental properties
    Properties,
    /// Mess facilities
    Messes,
    /// Gaming zones
    GamingZones,
}

#[OpenApi(prefix_path = "/listings")]
impl ListingsApi {
    /// Create a property listing
    #[oai(path = "/properties", method = "post", tag = "ListingTags::Properties")]
    async fn create_property(
        &self,
        req: &Request,
        body: Json<CreatePropertyRequest>,
    ) -> Result<Json<CreatedResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        let draft = PropertyDraft {
            name: body.0.name,
            city: body.0.city,
            address: body.0.address,
            monthly_rent: body.0.monthly_rent,
        };
        let id = self.properties.create(&ctx, &principal, draft).await?;
        Ok(Json(CreatedResponse { id }))
    }

    /// Fetch one property listing
    #[oai(path = "/properties/:id", method = "get", tag = "ListingTags::Properties")]
    async fn get_property(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<PropertyResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        self.check_read(&ctx, &principal, ResourceKind::Property).await?;

        let row = self
            .property_reader
            .get(&id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("property not found"))?;
        Ok(Json(row.into()))
    }

    /// Update a property listing
    #[oai(path = "/properties/:id", method = "put", tag = "ListingTags::Properties")]
    async fn update_property(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdatePropertyRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        let patch = PropertyPatch {
            name: body.0.name,
            city: body.0.city,
            address: body.0.address,
            monthly_rent: body.0.monthly_rent,
        };
        self.properties.update(&ctx, &principal, &id.0, patch).await?;
        Ok(Json(MessageResponse {
            message: "Property updated".to_string(),
        }))
    }

    /// Deactivate a property listing
    #[oai(path = "/properties/:id", method = "delete", tag = "ListingTags::Properties")]
    async fn delete_property(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        self.properties.delete(&ctx, &principal, &id.0).await?;
        Ok(Json(MessageResponse {
            message: "Property deactivated".to_string(),
        }))
    }

    /// Create a mess listing
    #[oai(path = "/messes", method = "post", tag = "ListingTags::Messes")]
    async fn create_mess(
        &self,
        req: &Request,
        body: Json<CreateMessRequest>,
    ) -> Result<Json<CreatedResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        let draft = MessDraft {
            name: body.0.name,
            city: body.0.city,
            address: body.0.address,
            monthly_price: body.0.monthly_price,
        };
        let id = self.messes.create(&ctx, &principal, draft).await?;
        Ok(Json(CreatedResponse { id }))
    }

    /// Fetch one mess listing
    #[oai(path = "/messes/:id", method = "get", tag = "ListingTags::Messes")]
    async fn get_mess(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<MessResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        self.check_read(&ctx, &principal, ResourceKind::Mess).await?;

        let row = self
            .mess_reader
            .get(&id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("mess not found"))?;
        Ok(Json(row.into()))
    }

    /// Update a mess listing
    #[oai(path = "/messes/:id", method = "put", tag = "ListingTags::Messes")]
    async fn update_mess(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateMessRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        let patch = MessPatch {
            name: body.0.name,
            city: body.0.city,
            address: body.0.address,
            monthly_price: body.0.monthly_price,
        };
        self.messes.update(&ctx, &principal, &id.0, patch).await?;
        Ok(Json(MessageResponse {
            message: "Mess updated".to_string(),
        }))
    }

    /// Deactivate a mess listing
    #[oai(path = "/messes/:id", method = "delete", tag = "ListingTags::Messes")]
    async fn delete_mess(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        self.messes.delete(&ctx, &principal, &id.0).await?;
        Ok(Json(MessageResponse {
            message: "Mess deactivated".to_string(),
        }))
    }

    /// Create a gaming zone listing
    #[oai(path = "/gaming-zones", method = "post", tag = "ListingTags::GamingZones")]
    async fn create_gaming_zone(
        &self,
        req: &Request,
        body: Json<CreateGamingZoneRequest>,
    ) -> Result<Json<CreatedResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        let draft = GamingZoneDraft {
            name: body.0.name,
            city: body.0.city,
            address: body.0.address,
            hourly_rate: body.0.hourly_rate,
        };
        let id = self.gaming_zones.create(&ctx, &principal, draft).await?;
        Ok(Json(CreatedResponse { id }))
    }

    /// Fetch one gaming zone listing
    #[oai(path = "/gaming-zones/:id", method = "get", tag = "ListingTags::GamingZones")]
    async fn get_gaming_zone(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<GamingZoneResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        self.check_read(&ctx, &principal, ResourceKind::GamingZone)
            .await?;

        let row = self
            .gaming_zone_reader
            .get(&id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("gaming zone not found"))?;
        Ok(Json(row.into()))
    }

    /// Update a gaming zone listing
    #[oai(path = "/gaming-zones/:id", method = "put", tag = "ListingTags::GamingZones")]
    async fn update_gaming_zone(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateGamingZoneRequest>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        let patch = GamingZonePatch {
            name: body.0.name,
            city: body.0.city,
            address: body.0.address,
            hourly_rate: body.0.hourly_rate,
        };
        self.gaming_zones
            .update(&ctx, &principal, &id.0, patch)
            .await?;
        Ok(Json(MessageResponse {
            message: "Gaming zone updated".to_string(),
        }))
    }

    /// Deactivate a gaming zone listing
    #[oai(path = "/gaming-zones/:id", method = "delete", tag = "ListingTags::GamingZones")]
    async fn delete_gaming_zone(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let (ctx, principal) = self.authenticate(req).await?;
        self.gaming_zones.delete(&ctx, &principal, &id.0).await?;
        Ok(Json(MessageResponse {
            message: "Gaming zone deactivated".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::user_store::{SubadminBackend, SubadminDraft};
    use crate::test::utils::{admin_principal, setup_test_env, TestEnv};
    use crate::types::internal::{PermissionSet, Role};
    use poem::Request;

    fn api_for(env: &TestEnv) -> ListingsApi {
        ListingsApi::new(
            env.users.clone(),
            env.tokens.clone(),
            env.recorder.clone(),
            Arc::new(ResourceGateway::new(
                PropertyStore::new(env.core_db.clone()),
                env.recorder.clone(),
            )),
            Arc::new(PropertyStore::new(env.core_db.clone())),
            Arc::new(ResourceGateway::new(
                MessStore::new(env.core_db.clone()),
                env.recorder.clone(),
            )),
            Arc::new(MessStore::new(env.core_db.clone())),
            Arc::new(ResourceGateway::new(
                GamingZoneStore::new(env.core_db.clone()),
                env.recorder.clone(),
            )),
            Arc::new(GamingZoneStore::new(env.core_db.clone())),
        )
    }

    async fn seed_subadmin(env: &TestEnv, permissions: PermissionSet) -> String {
        let ctx = RequestContext::for_system("test");
        let admin = admin_principal("admin-1", PermissionSet::all());
        let subadmins = ResourceGateway::new(
            SubadminBackend::new(env.core_db.clone()),
            env.recorder.clone(),
        );
        subadmins
            .create(
                &ctx,
                &admin,
                SubadminDraft {
                    email: "sub@example.com".to_string(),
                    display_name: "Sub".to_string(),
                    password_hash: "unused".to_string(),
                    permissions,
                },
            )
            .await
            .unwrap()
    }

    fn bearer_request(env: &TestEnv, principal_id: &str) -> Request {
        let (token, _) = env.tokens.issue(principal_id, Role::Subadmin).unwrap();
        Request::builder()
            .header("Authorization", format!("Bearer {}", token))
            .finish()
    }

    #[tokio::test]
    async fn denied_listing_read_is_recorded() {
        let env = setup_test_env().await;
        let api = api_for(&env);

        let sub_id = seed_subadmin(
            &env,
            PermissionSet {
                can_create: true,
                can_read: false,
                can_update: true,
                can_delete: true,
            },
        )
        .await;

        let req = bearer_request(&env, &sub_id);
        let result = api.get_property(&req, Path("any-id".to_string())).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));

        let records = env.activity_rows().await;
        assert!(records.iter().any(|r| r.action == "READ"
            && r.status == "FAILED"
            && r.resource_kind == "PROPERTY"
            && r.actor_id.as_deref() == Some(sub_id.as_str())));
    }

    #[tokio::test]
    async fn permitted_read_leaves_no_record() {
        let env = setup_test_env().await;
        let api = api_for(&env);

        let sub_id = seed_subadmin(&env, PermissionSet::all()).await;

        let req = bearer_request(&env, &sub_id);
        let result = api.get_property(&req, Path("missing-id".to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));

        let records = env.activity_rows().await;
        assert!(!records.iter().any(|r| r.action == "READ"));
    }
}
