// Database entity definitions (sea-orm)
pub mod user;
pub mod property;
pub mod mess;
pub mod gaming_zone;
pub mod activity_record;
