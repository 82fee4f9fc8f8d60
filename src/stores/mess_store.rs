use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::services::gateway::ResourceBackend;
use crate::types::db::mess;
use crate::types::internal::audit::ResourceKind;
use crate::types::internal::ResourceSnapshot;

/// New mess (meal service) listing.
pub struct MessDraft {
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub monthly_price: i64,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Clone)]
pub struct MessPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub monthly_price: Option<i64>,
}

pub struct MessStore {
    db: DatabaseConnection,
}

impl MessStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: &str) -> Result<Option<mess::Model>, InternalError> {
        mess::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_mess", e))
    }
}

#[async_trait]
impl ResourceBackend for MessStore {
    type CreatePayload = MessDraft;
    type UpdatePayload = MessPatch;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Mess
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

    async fn insert(&self, creator_id: &str, payload: MessDraft) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let id = Uuid::new_v4().to_string();

        mess::ActiveModel {
            id: Set(id.clone()),
            name: Set(payload.name),
            city: Set(payload.city),
            address: Set(payload.address),
            monthly_price: Set(payload.monthly_price),
            created_by: Set(creator_id.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_mess", e))?;

        Ok(id)
    }

    async fn apply_update(
        &self,
        snapshot: &ResourceSnapshot,
        payload: MessPatch,
    ) -> Result<bool, InternalError> {
        let mut update = mess::Entity::update_many()
            .filter(mess::Column::Id.eq(&snapshot.id))
            .filter(mess::Column::UpdatedAt.eq(snapshot.updated_at))
            .col_expr(mess::Column::UpdatedAt, Expr::value(Utc::now().timestamp()));

        if let Some(name) = payload.name {
            update = update.col_expr(mess::Column::Name, Expr::value(name));
        }
        if let Some(city) = payload.city {
            update = update.col_expr(mess::Column::City, Expr::value(city));
        }
        if let Some(address) = payload.address {
            update = update.col_expr(mess::Column::Address, Expr::value(address));
        }
        if let Some(monthly_price) = payload.monthly_price {
            update = update.col_expr(mess::Column::MonthlyPrice, Expr::value(monthly_price));
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("update_mess", e))?;

        Ok(result.rows_affected > 0)
    }

    async fn deactivate(&self, snapshot: &ResourceSnapshot) -> Result<bool, InternalError> {
        let result = mess::Entity::update_many()
            .filter(mess::Column::Id.eq(&snapshot.id))
            .filter(mess::Column::UpdatedAt.eq(snapshot.updated_at))
            .col_expr(mess::Column::IsActive, Expr::value(false))
            .col_expr(mess::Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("deactivate_mess", e))?;

        Ok(result.rows_affected > 0)
    }
}
