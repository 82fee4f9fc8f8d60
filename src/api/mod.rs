// API layer - HTTP endpoints
pub mod activity;
pub mod admin;
pub mod auth;
pub mod health;
pub mod helpers;
pub mod listings;

pub use activity::ActivityApi;
pub use admin::AdminApi;
pub use auth::AuthApi;
pub use health::HealthApi;
pub use listings::ListingsApi;
