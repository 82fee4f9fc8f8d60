use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::services::gateway::ResourceBackend;
use crate::types::db::user;
use crate::types::internal::audit::ResourceKind;
use crate::types::internal::{PermissionSet, Principal, ResourceSnapshot, Role};

/// Repository for identity records (admins, subadmins, end-users).
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load the acting principal for an authorization decision.
    ///
    /// Always read fresh from the store, never reconstructed from token
    /// claims, so permission and status changes apply immediately.
    pub async fn get_principal(&self, id: &str) -> Result<Option<Principal>, InternalError> {
        let row = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_principal", e))?;

        Ok(row.map(principal_from))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_email", e))
    }

    /// Self-signup: creates an end-user account with an empty permission
    /// vector. End-users never pass the admin gateways.
    pub async fn create_user(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<String, InternalError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(InternalError::Duplicate {
                field: "email",
                value: email.to_string(),
            });
        }

        let now = Utc::now().timestamp();
        let id = Uuid::new_v4().to_string();

        user::ActiveModel {
            id: Set(id.clone()),
            email: Set(email.to_string()),
            display_name: Set(display_name.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(Role::User.as_str().to_string()),
            can_create: Set(false),
            can_read: Set(false),
            can_update: Set(false),
            can_delete: Set(false),
            is_active: Set(true),
            created_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("create_user", e))?;

        Ok(id)
    }

    /// Seed an admin account. Used by bootstrap and test fixtures only;
    /// admins are not created through the gateways.
    pub async fn create_admin(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
        permissions: PermissionSet,
    ) -> Result<String, InternalError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(InternalError::Duplicate {
                field: "email",
                value: email.to_string(),
            });
        }

        let now = Utc::now().timestamp();
        let id = Uuid::new_v4().to_string();

        user::ActiveModel {
            id: Set(id.clone()),
            email: Set(email.to_string()),
            display_name: Set(display_name.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(Role::Admin.as_str().to_string()),
            can_create: Set(permissions.can_create),
            can_read: Set(permissions.can_read),
            can_update: Set(permissions.can_update),
            can_delete: Set(permissions.can_delete),
            is_active: Set(true),
            created_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("create_admin", e))?;

        Ok(id)
    }

    pub async fn list_subadmins(&self) -> Result<Vec<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::Role.eq(Role::Subadmin.as_str()))
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_subadmins", e))
    }
}

fn principal_from(model: user::Model) -> Principal {
    Principal {
        id: model.id,
        // Unknown role tags resolve to the user role, which the evaluator
        // denies everywhere - corrupt identity data fails closed.
        role: Role::from_str(&model.role).unwrap_or(Role::User),
        permissions: PermissionSet {
            can_create: model.can_create,
            can_read: model.can_read,
            can_update: model.can_update,
            can_delete: model.can_delete,
        },
        is_active: model.is_active,
    }
}

/// New subadmin account, as handed to the subadmin gateway.
pub struct SubadminDraft {
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub permissions: PermissionSet,
}

/// Partial update for a subadmin. `None` fields are left unchanged.
#[derive(Clone)]
pub struct SubadminPatch {
    pub display_name: Option<String>,
    pub permissions: Option<PermissionSet>,
    pub is_active: Option<bool>,
}

/// Gateway persistence seam for subadmin accounts. Subadmins are a gated
/// resource kind themselves: only their creator (or a permitted admin)
/// may modify them.
pub struct SubadminBackend {
    db: DatabaseConnection,
}

impl SubadminBackend {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceBackend for SubadminBackend {
    type CreatePayload = SubadminDraft;
    type UpdatePayload = SubadminPatch;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Subadmin
    }

    async fn load(&self, id: &str) -> Result<Option<ResourceSnapshot>, InternalError> {
        let row = user::Entity::find_by_id(id.to_string())
            .filter(user::Column::Role.eq(Role::Subadmin.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("load_subadmin", e))?;

        Ok(row.map(|r| ResourceSnapshot {
            id: r.id,
            created_by: r.created_by,
            is_active: r.is_active,
            updated_at: r.updated_at,
        }))
    }

    async fn insert(
        &self,
        creator_id: &str,
        payload: SubadminDraft,
    ) -> Result<String, InternalError> {
        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(&payload.email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_subadmin", e))?;
        if existing.is_some() {
            return Err(InternalError::Duplicate {
                field: "email",
                value: payload.email,
            });
        }

        let now = Utc::now().timestamp();
        let id = Uuid::new_v4().to_string();

        user::ActiveModel {
            id: Set(id.clone()),
            email: Set(payload.email),
            display_name: Set(payload.display_name),
            password_hash: Set(payload.password_hash),
            role: Set(Role::Subadmin.as_str().to_string()),
            can_create: Set(payload.permissions.can_create),
            can_read: Set(payload.permissions.can_read),
            can_update: Set(payload.permissions.can_update),
            can_delete: Set(payload.permissions.can_delete),
            is_active: Set(true),
            created_by: Set(Some(creator_id.to_string())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_subadmin", e))?;

        Ok(id)
    }

    async fn apply_update(
        &self,
        snapshot: &ResourceSnapshot,
        payload: SubadminPatch,
    ) -> Result<bool, InternalError> {
        let mut update = user::Entity::update_many()
            .filter(user::Column::Id.eq(&snapshot.id))
            .filter(user::Column::UpdatedAt.eq(snapshot.updated_at))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now().timestamp()));

        if let Some(display_name) = payload.display_name {
            update = update.col_expr(user::Column::DisplayName, Expr::value(display_name));
        }
        if let Some(permissions) = payload.permissions {
            update = update
                .col_expr(user::Column::CanCreate, Expr::value(permissions.can_create))
                .col_expr(user::Column::CanRead, Expr::value(permissions.can_read))
                .col_expr(user::Column::CanUpdate, Expr::value(permissions.can_update))
                .col_expr(user::Column::CanDelete, Expr::value(permissions.can_delete));
        }
        if let Some(is_active) = payload.is_active {
            update = update.col_expr(user::Column::IsActive, Expr::value(is_active));
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("update_subadmin", e))?;

        Ok(result.rows_affected > 0)
    }

    async fn deactivate(&self, snapshot: &ResourceSnapshot) -> Result<bool, InternalError> {
        let result = user::Entity::update_many()
            .filter(user::Column::Id.eq(&snapshot.id))
            .filter(user::Column::UpdatedAt.eq(snapshot.updated_at))
            .col_expr(user::Column::IsActive, Expr::value(false))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("deactivate_subadmin", e))?;

        Ok(result.rows_affected > 0)
    }
}
