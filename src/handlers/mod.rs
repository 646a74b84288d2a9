pub mod chat;
pub mod generate;
pub mod health;

pub use chat::chat;
pub use generate::{generate_from_audio, generate_from_document, generate_from_image};
pub use health::{health_check, metrics_endpoint, readiness_check};
