use poem_openapi::Object;

use crate::stores::activity_store::PageInfo;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Generic message response
#[derive(Object, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Response carrying the id of a newly created resource
#[derive(Object, Debug)]
pub struct CreatedResponse {
    pub id: String,
}

/// Pagination metadata attached to every listing response
#[derive(Object, Debug)]
pub struct PaginationMeta {
    /// 1-indexed page number
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// Total records matching the filter
    pub total: u64,
    /// Total pages (ceil(total / limit))
    pub pages: u64,
}

impl From<PageInfo> for PaginationMeta {
    fn from(info: PageInfo) -> Self {
        Self {
            page: info.page,
            limit: info.limit,
            total: info.total,
            pages: info.pages,
        }
    }
}
