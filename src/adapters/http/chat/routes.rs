//! Route definitions for the chat endpoints

use axum::routing::post;
use axum::Router;

use super::handlers::{chat, recommend_trip, ChatAppState};

/// Create the chat router with all endpoints
///
/// # Endpoints
///
/// - `POST /chat` - Process one turn of dialogue
/// - `POST /chat/recommendation` - One-shot structured recommendation
pub fn routes() -> Router<ChatAppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/recommendation", post(recommend_trip))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_creates_valid_router() {
        // Ensures the route configuration compiles and creates a valid router
        let _routes = routes();
    }
}
