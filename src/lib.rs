// Library exports for integration tests and external use

pub mod api;
pub mod app_data;
pub mod config;
pub mod errors;
pub mod services;
pub mod stores;
pub mod types;

// Test utilities; part of the library so integration tests share fixtures.
pub mod test;
