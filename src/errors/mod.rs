pub mod access;
pub mod api;
pub mod internal;

pub use access::{AccessError, GatewayError};
pub use api::ApiError;
pub use internal::InternalError;
