//! Ports - interfaces between the application core and the outside world.

mod ai_provider;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
};
pub use session_store::{SessionStore, SessionStoreError};
