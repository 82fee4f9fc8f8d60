// Test support code shared across unit and integration tests
pub mod utils;
