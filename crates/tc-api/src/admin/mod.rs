//! Admin dashboard endpoints. Every handler takes [`crate::auth::AdminUser`].

pub mod model;
pub mod routes;

pub use routes::routes;
