// Public modules
pub mod api;

// Public exports
pub use api::{ApiConfig, ApiError, ClientError, LlmApiConfigTrait};
