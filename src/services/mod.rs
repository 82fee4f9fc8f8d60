// Services layer - authorization core, activity recording, auth plumbing
pub mod activity_recorder;
pub mod crypto;
pub mod gateway;
pub mod ownership;
pub mod permission_evaluator;
pub mod token_service;

pub use activity_recorder::ActivityRecorder;
pub use gateway::{ResourceBackend, ResourceGateway};
pub use token_service::TokenService;
