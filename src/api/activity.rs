use std::sync::Arc;

use poem::Request;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};

use crate::api::helpers;
use crate::errors::ApiError;
use crate::services::activity_recorder::{self, ActivityRecorder};
use crate::services::permission_evaluator;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::dto::activity::{ActivityListResponse, ActivityRecordDto};
use crate::types::internal::audit::{ActionKind, ActionStatus, ActivityEntry, ResourceKind};
use crate::types::internal::context::RequestContext;
use crate::types::internal::Action;

/// Activity log reporting API
pub struct ActivityApi {
    users: Arc<UserStore>,
    tokens: Arc<TokenService>,
    recorder: Arc<ActivityRecorder>,
}

impl ActivityApi {
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

/// API tags for activity endpoints
#[derive(Tags)]
enum ActivityTags {
    /// Activity log
    Activity,
}

#[OpenApi]
impl ActivityApi {
    /// Filtered, paginated view of the activity log, most recent first
    #[oai(path = "/activity", method = "get", tag = "ActivityTags::Activity")]
    #[allow(clippy::too_many_arguments)]
    async fn list(
        &self,
        req: &Request,
        action: Query<Option<String>>,
        resource: Query<Option<String>>,
        user_id: Query<Option<String>>,
        start_date: Query<Option<String>>,
        end_date: Query<Option<String>>,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<ActivityListResponse>, ApiError> {
        let ctx = RequestContext::from_request(req, &self.tokens);
        let principal = helpers::require_principal(&ctx, &self.users).await?;

        if let Err(denied) = permission_evaluator::authorize(&principal, Action::Read, None) {
            self.recorder
                .record(
                    ActivityEntry::new(
                        ActionKind::Read,
                        ResourceKind::User,
                        ActionStatus::Failed,
                    )
                    .actor(&principal.id)
                    .detail(format!("denied: {}", denied))
                    .with_context(&ctx),
                )
                .await;
            return Err(denied.into());
        }

        let filter = activity_recorder::parse_filter(
            action.0.as_deref(),
            resource.0.as_deref(),
            user_id.0.as_deref(),
            start_date.0.as_deref(),
            end_date.0.as_deref(),
        )
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

        let (records, info) = self
            .recorder
            .list(&filter, page.0.unwrap_or(1), limit.0.unwrap_or(20))
            .await?;

        Ok(Json(ActivityListResponse {
            records: records.into_iter().map(ActivityRecordDto::from).collect(),
            pagination: info.into(),
        }))
    }
}
