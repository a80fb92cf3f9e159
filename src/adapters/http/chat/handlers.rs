//! HTTP handlers for the chat endpoints
//!
//! These handlers connect axum routes to the application layer handlers.
//! Every failure resolves to the `{ "error": ... }` envelope; completion
//! service failures never surface as 5xx on the dialogue endpoint because
//! the application layer folds them into the reply message.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    ProcessInputCommand, ProcessInputError, ProcessInputHandler, RecommendTripCommand,
    RecommendTripError, RecommendTripHandler,
};
use crate::application::RetryPolicy;
use crate::domain::foundation::SessionId;
use crate::ports::{AIProvider, SessionStore};

use super::dto::{ChatRequest, ChatResponse, ErrorResponse, RecommendTripRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies
///
/// The dialogue handler is long-lived: it owns the per-session lock registry
/// that serializes turns, so it is built once and shared.
#[derive(Clone)]
pub struct ChatAppState {
    pub process_input: Arc<ProcessInputHandler>,
    pub recommend_trip: Arc<RecommendTripHandler>,
}

impl ChatAppState {
    pub fn new(store: Arc<dyn SessionStore>, provider: Arc<dyn AIProvider>) -> Self {
        Self::with_retry_policy(store, provider, RetryPolicy::default())
    }

    pub fn with_retry_policy(
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn AIProvider>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            process_input: Arc::new(ProcessInputHandler::with_retry_policy(
                store,
                provider.clone(),
                policy.clone(),
            )),
            recommend_trip: Arc::new(RecommendTripHandler::with_retry_policy(provider, policy)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Process one turn of dialogue
///
/// POST /chat
pub async fn chat(
    State(state): State<ChatAppState>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let input = req.input.as_deref().map(str::trim).unwrap_or_default();
    if input.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing or empty \"input\" field")),
        ));
    }

    let session_id = match req.session_id.as_deref() {
        Some(raw) => SessionId::from_str(raw).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid session_id format")),
            )
        })?,
        None => SessionId::shared(),
    };

    let cmd = ProcessInputCommand {
        session_id,
        input: input.to_string(),
    };

    let result = state.process_input.handle(cmd).await.map_err(|e| match e {
        ProcessInputError::EmptyInput => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing or empty \"input\" field")),
        ),
        ProcessInputError::Store(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(msg)),
        ),
    })?;

    Ok((
        StatusCode::OK,
        Json(ChatResponse {
            intent_response: result.intent_label,
            message: result.message,
            recommendation: result.recommendation,
        }),
    ))
}

/// Produce a one-shot structured recommendation
///
/// POST /chat/recommendation
pub async fn recommend_trip(
    State(state): State<ChatAppState>,
    Json(req): Json<RecommendTripRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let input = req.input.as_deref().map(str::trim).unwrap_or_default();
    if input.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing or empty \"input\" field")),
        ));
    }

    let cmd = RecommendTripCommand {
        input: input.to_string(),
    };

    let record = state.recommend_trip.handle(cmd).await.map_err(|e| match e {
        RecommendTripError::EmptyInput => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing or empty \"input\" field")),
        ),
        RecommendTripError::Generator(err) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::new(err.user_message())),
        ),
    })?;

    Ok((StatusCode::OK, Json(record)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySessionStore, MockAIProvider, MockError};
    use axum::response::Response;
    use http::StatusCode;

    fn app_state(provider: MockAIProvider) -> ChatAppState {
        ChatAppState::new(Arc::new(InMemorySessionStore::new()), Arc::new(provider))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_returns_reply_payload() {
        let state = app_state(
            MockAIProvider::new()
                .with_response("intent: 여행 추천 요청\nkeywords: 바다")
                .with_response("다낭"),
        );

        let req = ChatRequest {
            input: Some("바다 여행 추천해줘".to_string()),
            session_id: None,
        };
        let response = chat(State(state), Json(req)).await.unwrap().into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["intent_response"], "여행 추천 요청");
        assert_eq!(body["recommendation"], "다낭");
        assert!(body["message"].as_str().unwrap().contains("다낭"));
    }

    #[tokio::test]
    async fn chat_without_recommendation_serializes_null() {
        let state = app_state(MockAIProvider::new().with_response("intent: 인사"));

        let req = ChatRequest {
            input: Some("안녕하세요".to_string()),
            session_id: None,
        };
        let response = chat(State(state), Json(req)).await.unwrap().into_response();

        let body = body_json(response).await;
        assert!(body["recommendation"].is_null());
    }

    #[tokio::test]
    async fn chat_rejects_missing_input() {
        let state = app_state(MockAIProvider::new());

        let req = ChatRequest {
            input: None,
            session_id: None,
        };
        let err = chat(State(state), Json(req)).await.err().unwrap();

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.error.contains("input"));
    }

    #[tokio::test]
    async fn chat_rejects_blank_input() {
        let state = app_state(MockAIProvider::new());

        let req = ChatRequest {
            input: Some("   ".to_string()),
            session_id: None,
        };
        let err = chat(State(state), Json(req)).await.err().unwrap();

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_rejects_malformed_session_id() {
        let state = app_state(MockAIProvider::new());

        let req = ChatRequest {
            input: Some("여행 추천해줘".to_string()),
            session_id: Some("definitely-not-a-uuid".to_string()),
        };
        let err = chat(State(state), Json(req)).await.err().unwrap();

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.error.contains("session_id"));
    }

    #[tokio::test]
    async fn recommend_trip_returns_record() {
        let reply = "[추천 여행지]\n오사카, 일본을 추천드립니다.\n\n[주요 명소]\n도톤보리\n\n[추천 계절]\n봄\n\n[나라 이름]\n일본";
        let state = app_state(MockAIProvider::new().with_response(reply));

        let req = RecommendTripRequest {
            input: Some("미식 여행 가고 싶어".to_string()),
        };
        let response = recommend_trip(State(state), Json(req))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["destination_city"], "일본");
        assert_eq!(body["landmarks"][0], "도톤보리");
        assert_eq!(body["season"], "봄");
    }

    #[tokio::test]
    async fn recommend_trip_maps_service_failure_to_bad_gateway() {
        let state = app_state(MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        }));

        let req = RecommendTripRequest {
            input: Some("아무 곳이나".to_string()),
        };
        let err = recommend_trip(State(state), Json(req)).await.err().unwrap();

        assert_eq!(err.0, StatusCode::BAD_GATEWAY);
    }
}
