use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::activity_record;
use crate::types::internal::audit::{ActivityEntry, ActivityFilter};

/// Pagination metadata for a filtered activity query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

/// Repository for the append-only activity log.
///
/// Rows are inserted exactly once and never updated or deleted; this store
/// deliberately has no mutation surface beyond `append`.
pub struct ActivityStore {
    db: DatabaseConnection,
}

impl ActivityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append one activity record, stamping it with the current time.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if the insert fails. The caller (the
    /// recorder) decides whether that is fatal; for business mutations it
    /// is not.
    pub async fn append(&self, entry: ActivityEntry) -> Result<activity_record::Model, InternalError> {
        let row = activity_record::ActiveModel {
            id: sea_orm::ActiveValue::NotSet, // auto-increment
            actor_id: Set(entry.actor_id),
            action: Set(entry.action.as_str().to_string()),
            resource_kind: Set(entry.resource_kind.as_str().to_string()),
            resource_id: Set(entry.resource_id),
            status: Set(entry.status.as_str().to_string()),
            detail: Set(entry.detail),
            ip_address: Set(entry.ip_address),
            user_agent: Set(entry.user_agent),
            created_at: Set(Utc::now().timestamp()),
        };

        row.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("append_activity_record", e))
    }

    /// Filtered, paginated slice of the log.
    ///
    /// Filters are ANDed; absent fields are no-ops. Ordering is created_at
    /// descending with the row id as tiebreaker, so pagination is stable
    /// for records written within the same second.
    ///
    /// `page` is 1-indexed; page and limit are clamped to at least 1.
    pub async fn list(
        &self,
        filter: &ActivityFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<activity_record::Model>, PageInfo), InternalError> {
        let page = page.max(1);
        let limit = limit.max(1);

        let mut query = activity_record::Entity::find();

        if let Some(action) = filter.action {
            query = query.filter(activity_record::Column::Action.eq(action.as_str()));
        }
        if let Some(kind) = filter.resource_kind {
            query = query.filter(activity_record::Column::ResourceKind.eq(kind.as_str()));
        }
        if let Some(actor_id) = &filter.actor_id {
            query = query.filter(activity_record::Column::ActorId.eq(actor_id));
        }
        if let Some(start) = filter.start {
            query = query.filter(activity_record::Column::CreatedAt.gte(start));
        }
        if let Some(end) = filter.end {
            query = query.filter(activity_record::Column::CreatedAt.lte(end));
        }

        let query = query
            .order_by_desc(activity_record::Column::CreatedAt)
            .order_by_desc(activity_record::Column::Id);

        let paginator = query.paginate(&self.db, limit);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| InternalError::database("count_activity_records", e))?;

        let records = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| InternalError::database("list_activity_records", e))?;

        let pages = total.div_ceil(limit);

        Ok((
            records,
            PageInfo {
                page,
                limit,
                total,
                pages,
            },
        ))
    }
}
