use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::errors::access::{AccessError, GatewayError};
use crate::errors::InternalError;

/// Standardized error response body for all endpoints
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Shared API error surface.
///
/// The source re-implemented error mapping per dashboard; here every
/// endpoint converts core errors through this single enum.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed input (bad filter values, invalid role strings)
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),

    /// Missing/invalid credentials or inactive account
    #[oai(status = 401)]
    Unauthorized(Json<ErrorBody>),

    /// Authenticated but not permitted
    #[oai(status = 403)]
    Forbidden(Json<ErrorBody>),

    /// Target resource does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    /// Uniqueness violation (duplicate email)
    #[oai(status = 409)]
    Conflict(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(Json(ErrorBody {
            error: "bad_request".to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(Json(ErrorBody {
            error: "unauthorized".to_string(),
            message: message.into(),
            status_code: 401,
        }))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(Json(ErrorBody {
            error: "forbidden".to_string(),
            message: message.into(),
            status_code: 403,
        }))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorBody {
            error: "not_found".to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(Json(ErrorBody {
            error: "conflict".to_string(),
            message: message.into(),
            status_code: 409,
        }))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        ApiError::Internal(Json(ErrorBody {
            error: "internal_error".to_string(),
            message: message.into(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(json) => json.0.message.clone(),
            ApiError::Unauthorized(json) => json.0.message.clone(),
            ApiError::Forbidden(json) => json.0.message.clone(),
            ApiError::NotFound(json) => json.0.message.clone(),
            ApiError::Conflict(json) => json.0.message.clone(),
            ApiError::Internal(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match &err {
            AccessError::Unauthorized => ApiError::unauthorized(err.to_string()),
            AccessError::Forbidden { reason } => ApiError::forbidden(reason.clone()),
            AccessError::NotFound { .. } => ApiError::not_found(err.to_string()),
        }
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        match &err {
            InternalError::Duplicate { .. } | InternalError::Conflict { .. } => {
                ApiError::conflict(err.to_string())
            }
            // Internal detail stays in the server logs, not the response
            other => {
                tracing::error!("internal error surfaced to API: {}", other);
                ApiError::internal_error("Internal server error".to_string())
            }
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Access(access) => access.into(),
            GatewayError::Internal(internal) => internal.into(),
        }
    }
}
