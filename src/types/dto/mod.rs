// DTO layer - API data transfer objects
pub mod activity;
pub mod admin;
pub mod auth;
pub mod common;
pub mod listings;
