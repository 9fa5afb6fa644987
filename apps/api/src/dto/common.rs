mod types;

pub use types::{AccessDeniedResponse, ErrorResponse, HealthResponse};
