pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod progress;
pub mod router;
pub mod state;
pub mod study;
pub mod tracing;
pub mod validation;

pub use config::ApiConfig;
pub use state::ApiState;
