//! Pluggable middleware implementing the [`Handler`](crate::Handler)
//! continuation contract: schema validation, CORS, and bearer-token auth.

mod auth;
mod cors;
mod validation;

pub use auth::{AuthMiddleware, AuthProvider};
pub use cors::CorsMiddleware;
pub use validation::{BodyValidator, QueryValidator};
