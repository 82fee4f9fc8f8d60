use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::services::gateway::ResourceBackend;
use crate::types::db::gaming_zone;
use crate::types::internal::audit::ResourceKind;
use crate::types::internal::ResourceSnapshot;

/// New gaming zone listing.
pub struct GamingZoneDraft {
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub hourly_rate: i64,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Clone)]
pub struct GamingZonePatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub hourly_rate: Option<i64>,
}

pub struct GamingZoneStore {
    db: DatabaseConnection,
}

impl GamingZoneStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: &str) -> Result<Option<gaming_zone::Model>, InternalError> {
        gaming_zone::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_gaming_zone", e))
    }
}

#[async_trait]
impl ResourceBackend for GamingZoneStore {
    type CreatePayload = GamingZoneDraft;
    type UpdatePayload = GamingZonePatch;

    fn kind(&self) -> ResourceKind {
        ResourceKind::GamingZone
    }

    async fn load(&self, id: &str) -> Result<Option<ResourceSnapshot>, InternalError> {
        let row = self.get(id).await?;
        Ok(row.map(|r| ResourceSnapshot {
            id: r.id,
            created_by: Some(r.created_by),
            is_active: r.is_active,
            updated_at: r.updated_at,
        }))
    }

    async fn insert(
        &self,
        creator_id: &str,
        payload: GamingZoneDraft,
    ) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let id = Uuid::new_v4().to_string();

        gaming_zone::ActiveModel {
            id: Set(id.clone()),
            name: Set(payload.name),
            city: Set(payload.city),
            address: Set(payload.address),
            hourly_rate: Set(payload.hourly_rate),
            created_by: Set(creator_id.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_gaming_zone", e))?;

        Ok(id)
    }

    async fn apply_update(
        &self,
        snapshot: &ResourceSnapshot,
        payload: GamingZonePatch,
    ) -> Result<bool, InternalError> {
        let mut update = gaming_zone::Entity::update_many()
            .filter(gaming_zone::Column::Id.eq(&snapshot.id))
            .filter(gaming_zone::Column::UpdatedAt.eq(snapshot.updated_at))
            .col_expr(gaming_zone::Column::UpdatedAt, Expr::value(Utc::now().timestamp()));

        if let Some(name) = payload.name {
            update = update.col_expr(gaming_zone::Column::Name, Expr::value(name));
        }
        if let Some(city) = payload.city {
            update = update.col_expr(gaming_zone::Column::City, Expr::value(city));
        }
        if let Some(address) = payload.address {
            update = update.col_expr(gaming_zone::Column::Address, Expr::value(address));
        }
        if let Some(hourly_rate) = payload.hourly_rate {
            update = update.col_expr(gaming_zone::Column::HourlyRate, Expr::value(hourly_rate));
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("update_gaming_zone", e))?;

        Ok(result.rows_affected > 0)
    }

    async fn deactivate(&self, snapshot: &ResourceSnapshot) -> Result<bool, InternalError> {
        let result = gaming_zone::Entity::update_many()
            .filter(gaming_zone::Column::Id.eq(&snapshot.id))
            .filter(gaming_zone::Column::UpdatedAt.eq(snapshot.updated_at))
            .col_expr(gaming_zone::Column::IsActive, Expr::value(false))
            .col_expr(gaming_zone::Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("deactivate_gaming_zone", e))?;

        Ok(result.rows_affected > 0)
    }
}
