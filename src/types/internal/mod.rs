// Internal domain types - never exposed directly via the API
pub mod principal;
pub mod audit;
pub mod auth;
pub mod context;
pub mod resource;

pub use principal::{Action, PermissionSet, Principal, Role};
pub use resource::ResourceSnapshot;
