pub mod admin;
pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod navigation;
pub mod router;
pub mod state;
pub mod subcategory;
pub mod topic;
pub mod tracing;
pub mod validation;

pub use config::ApiConfig;
pub use state::{AdminAuth, ApiState};
