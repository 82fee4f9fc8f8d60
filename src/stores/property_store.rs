use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::services::gateway::ResourceBackend;
use crate::types::db::property;
use crate::types::internal::audit::ResourceKind;
use crate::types::internal::ResourceSnapshot;

/// New PG/hostel listing.
pub struct PropertyDraft {
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub monthly_rent: i64,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Clone)]
pub struct PropertyPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub monthly_rent: Option<i64>,
}

pub struct PropertyStore {
    db: DatabaseConnection,
}

impl PropertyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: &str) -> Result<Option<property::Model>, InternalError> {
        property::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_property", e))
    }
}

#[async_trait]
impl ResourceBackend for PropertyStore {
    type CreatePayload = PropertyDraft;
    type UpdatePayload = PropertyPatch;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Property
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
        payload: PropertyDraft,
    ) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let id = Uuid::new_v4().to_string();

        property::ActiveModel {
            id: Set(id.clone()),
            name: Set(payload.name),
            city: Set(payload.city),
            address: Set(payload.address),
            monthly_rent: Set(payload.monthly_rent),
            created_by: Set(creator_id.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_property", e))?;

        Ok(id)
    }

    async fn apply_update(
        &self,
        snapshot: &ResourceSnapshot,
        payload: PropertyPatch,
    ) -> Result<bool, InternalError> {
        // Guarded by the snapshot's updated_at so the row that was
        // authorized is the row that changes.
        let mut update = property::Entity::update_many()
            .filter(property::Column::Id.eq(&snapshot.id))
            .filter(property::Column::UpdatedAt.eq(snapshot.updated_at))
            .col_expr(property::Column::UpdatedAt, Expr::value(Utc::now().timestamp()));

        if let Some(name) = payload.name {
            update = update.col_expr(property::Column::Name, Expr::value(name));
        }
        if let Some(city) = payload.city {
            update = update.col_expr(property::Column::City, Expr::value(city));
        }
        if let Some(address) = payload.address {
            update = update.col_expr(property::Column::Address, Expr::value(address));
        }
        if let Some(monthly_rent) = payload.monthly_rent {
            update = update.col_expr(property::Column::MonthlyRent, Expr::value(monthly_rent));
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("update_property", e))?;

        Ok(result.rows_affected > 0)
    }

    async fn deactivate(&self, snapshot: &ResourceSnapshot) -> Result<bool, InternalError> {
        let result = property::Entity::update_many()
            .filter(property::Column::Id.eq(&snapshot.id))
            .filter(property::Column::UpdatedAt.eq(snapshot.updated_at))
            .col_expr(property::Column::IsActive, Expr::value(false))
            .col_expr(property::Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("deactivate_property", e))?;

        Ok(result.rows_affected > 0)
    }
}
