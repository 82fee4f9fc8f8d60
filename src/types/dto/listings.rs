use poem_openapi::Object;

use crate::types::db::{gaming_zone, mess, property};

/// Request body for property creation
#[derive(Object, Debug)]
pub struct CreatePropertyRequest {
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub monthly_rent: i64,
}

/// Partial property update; omitted fields are left unchanged
#[derive(Object, Debug)]
pub struct UpdatePropertyRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub monthly_rent: Option<i64>,
}

#[derive(Object, Debug)]
pub struct PropertyResponse {
    pub id: String,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub monthly_rent: i64,
    pub created_by: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<property::Model> for PropertyResponse {
    fn from(model: property::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            city: model.city,
            address: model.address,
            monthly_rent: model.monthly_rent,
            created_by: model.created_by,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Request body for mess creation
#[derive(Object, Debug)]
pub struct CreateMessRequest {
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub monthly_price: i64,
}

/// Partial mess update; omitted fields are left unchanged
#[derive(Object, Debug)]
pub struct UpdateMessRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub monthly_price: Option<i64>,
}

#[derive(Object, Debug)]
pub struct MessResponse {
    pub id: String,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub monthly_price: i64,
    pub created_by: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<mess::Model> for MessResponse {
    fn from(model: mess::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            city: model.city,
            address: model.address,
            monthly_price: model.monthly_price,
            created_by: model.created_by,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Request body for gaming zone creation
#[derive(Object, Debug)]
pub struct CreateGamingZoneRequest {
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub hourly_rate: i64,
}

/// Partial gaming zone update; omitted fields are left unchanged
#[derive(Object, Debug)]
pub struct UpdateGamingZoneRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub hourly_rate: Option<i64>,
}

#[derive(Object, Debug)]
pub struct GamingZoneResponse {
    pub id: String,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub hourly_rate: i64,
    pub created_by: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<gaming_zone::Model> for GamingZoneResponse {
    fn from(model: gaming_zone::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            city: model.city,
            address: model.address,
            hourly_rate: model.hourly_rate,
            created_by: model.created_by,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
