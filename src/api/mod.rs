//! HTTP API for the graph service

pub mod chat_handlers;
pub mod handlers;
pub mod routes;

pub use handlers::AppError;
pub use routes::create_router;
