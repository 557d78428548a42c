pub mod body;
pub mod config;
pub mod deck;
pub mod error;
pub mod favorites;
pub mod hash;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tracing;

pub use config::ApiConfig;
pub use state::ApiState;
