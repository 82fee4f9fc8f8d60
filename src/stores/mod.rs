// Stores layer - Data access and repository pattern
pub mod activity_store;
pub mod gaming_zone_store;
pub mod mess_store;
pub mod property_store;
pub mod user_store;

pub use activity_store::ActivityStore;
pub use gaming_zone_store::GamingZoneStore;
pub use mess_store::MessStore;
pub use property_store::PropertyStore;
pub use user_store::{SubadminBackend, UserStore};
