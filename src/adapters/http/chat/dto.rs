//! HTTP DTOs for the chat endpoints
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to process one turn of dialogue
///
/// `input` is optional at the serde level so a missing field produces the
/// documented error envelope instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub input: Option<String>,
    /// Session to continue; omitted requests share the default session.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Request for a one-shot structured recommendation
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendTripRequest {
    #[serde(default)]
    pub input: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for one turn of dialogue
///
/// `recommendation` serializes as `null` when the turn produced none.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub intent_response: String,
    pub message: String,
    pub recommendation: Option<String>,
}

/// Error envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_tolerates_missing_fields() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.input.is_none());
        assert!(req.session_id.is_none());
    }

    #[test]
    fn chat_request_deserializes_full_payload() {
        let json = r#"{"input":"여행 추천해줘","session_id":"6f0f9c8e-7a1c-4a7e-9f35-0123456789ab"}"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.input.as_deref(), Some("여행 추천해줘"));
        assert!(req.session_id.is_some());
    }

    #[test]
    fn chat_response_serializes_null_recommendation() {
        let response = ChatResponse {
            intent_response: "인사".to_string(),
            message: "무엇을 도와드릴까요?".to_string(),
            recommendation: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"recommendation\":null"));
    }

    #[test]
    fn error_response_serializes_single_field() {
        let json = serde_json::to_string(&ErrorResponse::new("bad input")).unwrap();
        assert_eq!(json, r#"{"error":"bad input"}"#);
    }
}
