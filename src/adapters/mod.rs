//! Adapters - concrete implementations of the ports.

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{MockAIProvider, MockError, OpenAIConfig, OpenAIProvider};
pub use storage::{FileSessionStore, InMemorySessionStore};
