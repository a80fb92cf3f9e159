//! HTTP surface for the chat endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ChatAppState;
pub use routes::routes;
