// HTTP server setup (Axum)
pub mod app;
pub mod error;
pub mod guard;
pub mod middleware;
pub mod routes;

pub use app::*;
pub use error::ApiError;
