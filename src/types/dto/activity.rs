use poem_openapi::Object;

use crate::types::db::activity_record;
use crate::types::dto::common::PaginationMeta;

/// One row of the activity log as returned by the admin view
#[derive(Object, Debug)]
pub struct ActivityRecordDto {
    pub id: i64,
    pub actor_id: Option<String>,
    pub action: String,
    pub resource_kind: String,
    pub resource_id: Option<String>,
    pub status: String,
    pub detail: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: i64,
}

impl From<activity_record::Model> for ActivityRecordDto {
    fn from(model: activity_record::Model) -> Self {
        Self {
            id: model.id,
            actor_id: model.actor_id,
            action: model.action,
            resource_kind: model.resource_kind,
            resource_id: model.resource_id,
            status: model.status,
            detail: model.detail,
            ip_address: model.ip_address,
            user_agent: model.user_agent,
            created_at: model.created_at,
        }
    }
}

/// Paginated activity log page
#[derive(Object, Debug)]
pub struct ActivityListResponse {
    pub records: Vec<ActivityRecordDto>,
    pub pagination: PaginationMeta,
}
