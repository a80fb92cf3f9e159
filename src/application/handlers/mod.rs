//! Application command handlers.

mod process_input;
mod recommend_trip;

pub use process_input::{
    ProcessInputCommand, ProcessInputError, ProcessInputHandler, ProcessInputResult,
};
pub use recommend_trip::{RecommendTripCommand, RecommendTripError, RecommendTripHandler};
