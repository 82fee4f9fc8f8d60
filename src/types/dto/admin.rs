use poem_openapi::Object;

use crate::types::db::user;
use crate::types::internal::PermissionSet;

/// The four-flag permission vector as it appears on the wire
#[derive(Object, Debug, Clone, Copy)]
pub struct PermissionFlags {
    pub can_create: bool,
    pub can_read: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

impl From<PermissionFlags> for PermissionSet {
    fn from(flags: PermissionFlags) -> Self {
        Self {
            can_create: flags.can_create,
            can_read: flags.can_read,
            can_update: flags.can_update,
            can_delete: flags.can_delete,
        }
    }
}

/// Request body for subadmin creation
#[derive(Object, Debug)]
pub struct CreateSubadminRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
    pub permissions: PermissionFlags,
}

/// Partial update for a subadmin; omitted fields are left unchanged
#[derive(Object, Debug)]
pub struct UpdateSubadminRequest {
    pub display_name: Option<String>,
    pub permissions: Option<PermissionFlags>,
    pub is_active: Option<bool>,
}

/// Subadmin as returned by the admin view
#[derive(Object, Debug)]
pub struct SubadminResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub permissions: PermissionFlags,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<user::Model> for SubadminResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            display_name: model.display_name,
            permissions: PermissionFlags {
                can_create: model.can_create,
                can_read: model.can_read,
                can_update: model.can_update,
                can_delete: model.can_delete,
            },
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

/// List of subadmins for the admin dashboard
#[derive(Object, Debug)]
pub struct SubadminListResponse {
    pub subadmins: Vec<SubadminResponse>,
}
