//! Travel Concierge - Conversational travel recommendation service
//!
//! Routes free-text user input through an LLM-backed intent classifier and
//! produces either a travel recommendation or a fallback reply, keeping
//! per-session slot-filling state across turns.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
