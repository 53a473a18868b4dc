//! HTTP Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub model: String,
    pub market_data: bool,
}

/// Chat request body.
///
/// Both fields are kept as raw JSON so that wrong types are reported as a
/// missing message or an empty history instead of a decode failure.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Value,
    #[serde(default)]
    pub history: Value,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.agent.provider_name().to_string(),
        model: state.agent.config().generation.model.clone(),
        market_data: state.agent.has_context_source(),
    })
}

/// Any method other than POST on the chat route
pub async fn method_not_allowed() -> ApiError {
    api_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Main chat endpoint
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!("Rejected chat body: {}", e);
        api_error(StatusCode::BAD_REQUEST, "Invalid request body")
    })?;

    let message = payload.message.as_str().unwrap_or_default();

    let reply = state
        .agent
        .reply(message, &payload.history)
        .await
        .map_err(|e| {
            let status = if e.is_client_error() {
                tracing::debug!("Chat request rejected: {}", e);
                StatusCode::BAD_REQUEST
            } else {
                tracing::error!("Chat error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            };
            api_error(status, e.user_message())
        })?;

    Ok(Json(ChatResponse { reply }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tokenmate_core::{
        ChatAgent, ChatError, ContextSource, LlmProvider, Message, Role,
        prompt::TOKENMATE_SYSTEM_PROMPT,
        provider::{Completion, GenerationOptions},
    };
    use tokenmate_market::{MarketContextSource, MarketSnapshot, MockMarketClient};
    use tower::ServiceExt;

    use crate::app::router;
    use crate::state::AppState;

    enum Outcome {
        Reply(Option<String>),
        Upstream(Option<String>),
        Transport,
    }

    /// Provider that records prompts and answers from a script
    struct ScriptedProvider {
        outcome: Outcome,
        prompts: Mutex<Vec<Vec<Message>>>,
    }

    impl ScriptedProvider {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn replying(text: &str) -> Arc<Self> {
            Self::new(Outcome::Reply(Some(text.into())))
        }

        fn prompts(&self) -> Vec<Vec<Message>> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "Scripted"
        }

        async fn complete(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> tokenmate_core::Result<Completion> {
            self.prompts.lock().unwrap().push(messages.to_vec());
            match &self.outcome {
                Outcome::Reply(content) => Ok(Completion {
                    content: content.clone(),
                    model: options.model.clone(),
                    ..Default::default()
                }),
                Outcome::Upstream(message) => Err(ChatError::Upstream {
                    status: 500,
                    message: message.clone(),
                }),
                Outcome::Transport => Err(ChatError::Transport("connection reset".into())),
            }
        }
    }

    fn app(provider: Arc<ScriptedProvider>, market: Option<Arc<MockMarketClient>>) -> Router {
        let mut builder = ChatAgent::builder().provider(provider);
        if let Some(market) = market {
            let source: Arc<dyn ContextSource> = Arc::new(MarketContextSource::new(market));
            builder = builder.context_source(source);
        }
        let agent = builder.build().unwrap();

        router(AppState {
            agent: Arc::new(agent),
        })
    }

    fn post_json(body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_non_post_methods_rejected_without_network() {
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let provider = ScriptedProvider::replying("hi");
            let market = Arc::new(MockMarketClient::new());
            let app = app(provider.clone(), Some(market.clone()));

            let request = Request::builder()
                .method(method.clone())
                .uri("/api/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"message": "btc price"}).to_string()))
                .unwrap();
            let (status, body) = send(app, request).await;

            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
            assert_eq!(body, json!({"error": "Method not allowed"}));
            assert!(provider.prompts().is_empty());
            assert_eq!(market.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_missing_message_is_bad_request() {
        let bodies = [
            json!({}),
            json!({"message": ""}),
            json!({"message": 42}),
            json!({"message": "  "}),
        ];
        for body in bodies {
            let provider = ScriptedProvider::replying("hi");
            let market = Arc::new(MockMarketClient::new());
            let (status, response) =
                send(app(provider.clone(), Some(market.clone())), post_json(&body)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(response, json!({"error": "Message is required"}));
            assert!(provider.prompts().is_empty());
            assert_eq!(market.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let provider = ScriptedProvider::replying("hi");
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(app(provider.clone(), None), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid request body"}));
        assert!(provider.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_eth_price_scenario() {
        let provider = ScriptedProvider::replying("ETH is trading at $2,500.5.");
        let market = Arc::new(
            MockMarketClient::empty().with_snapshot("ethereum", MarketSnapshot::new(2500.5, -1.23)),
        );
        let app = app(provider.clone(), Some(market.clone()));

        let (status, body) =
            send(app, post_json(&json!({"message": "What's the price of ETH?"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"reply": "ETH is trading at $2,500.5."}));
        assert_eq!(market.calls(), 1);

        let prompts = provider.prompts();
        let prompt = &prompts[0];
        assert_eq!(prompt.len(), 3);
        assert_eq!(prompt[0], Message::system(TOKENMATE_SYSTEM_PROMPT));
        assert_eq!(prompt[1].role, Role::System);
        assert!(
            prompt[1]
                .content
                .contains("Live price (USD) for ethereum: $2,500.5 (24h: -1.23%).")
        );
        assert_eq!(prompt[2], Message::user("What's the price of ETH?"));
    }

    #[tokio::test]
    async fn test_hello_has_no_market_context() {
        let provider = ScriptedProvider::replying("Hello!");
        let market = Arc::new(MockMarketClient::new());
        let app = app(provider.clone(), Some(market.clone()));

        let history = json!([
            {"role": "user", "content": "hi"},
            {"role": "assistant", "content": "Hey there."},
        ]);
        let request = post_json(&json!({"message": "hello", "history": history}));
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(market.calls(), 0);

        let prompt = &provider.prompts()[0];
        assert_eq!(
            *prompt,
            vec![
                Message::system(TOKENMATE_SYSTEM_PROMPT),
                Message::user("hi"),
                Message::assistant("Hey there."),
                Message::user("hello"),
            ]
        );
    }

    #[tokio::test]
    async fn test_non_array_history_is_ignored() {
        for history in [json!(null), json!("oops"), json!({"role": "user"}), json!(3)] {
            let provider = ScriptedProvider::replying("ok");
            let (status, _) = send(
                app(provider.clone(), None),
                post_json(&json!({"message": "hello", "history": history})),
            )
            .await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(provider.prompts()[0].len(), 2);
        }
    }

    #[tokio::test]
    async fn test_history_trimmed_to_last_twelve() {
        let provider = ScriptedProvider::replying("ok");
        let history: Vec<Value> = (0..30)
            .map(|i| {
                if i % 3 == 0 {
                    json!({"role": "system", "content": format!("bad {i}")})
                } else {
                    json!({"role": "user", "content": format!("msg {i}")})
                }
            })
            .collect();

        let (status, _) = send(
            app(provider.clone(), None),
            post_json(&json!({"message": "hello", "history": history})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let prompt = &provider.prompts()[0];
        let forwarded: Vec<&str> = prompt[1..prompt.len() - 1]
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        let expected: Vec<String> = (12..30)
            .filter(|i| i % 3 != 0)
            .map(|i| format!("msg {i}"))
            .collect();
        assert_eq!(forwarded, expected);
    }

    #[tokio::test]
    async fn test_market_failure_does_not_fail_request() {
        let provider = ScriptedProvider::replying("Bitcoin is a decentralized currency.");
        let market = Arc::new(MockMarketClient::failing());
        let app = app(provider.clone(), Some(market.clone()));

        let request = post_json(&json!({"message": "tell me about bitcoin"}));
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"reply": "Bitcoin is a decentralized currency."}));
        assert_eq!(market.calls(), 1);

        let prompt = &provider.prompts()[0];
        assert_eq!(prompt.iter().filter(|m| m.role == Role::System).count(), 1);
    }

    #[tokio::test]
    async fn test_upstream_error_message_surfaced() {
        let provider = ScriptedProvider::new(Outcome::Upstream(Some("Invalid API key".into())));
        let (status, body) = send(app(provider, None), post_json(&json!({"message": "hi"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Invalid API key"}));

        let provider = ScriptedProvider::new(Outcome::Upstream(None));
        let (status, body) = send(app(provider, None), post_json(&json!({"message": "hi"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "OpenAI request failed"}));
    }

    #[tokio::test]
    async fn test_transport_error_is_generic() {
        let provider = ScriptedProvider::new(Outcome::Transport);
        let (status, body) = send(app(provider, None), post_json(&json!({"message": "hi"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "AI failed to respond"}));
    }

    #[tokio::test]
    async fn test_missing_choice_replies_fallback() {
        let provider = ScriptedProvider::new(Outcome::Reply(None));
        let (status, body) = send(app(provider, None), post_json(&json!({"message": "hi"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"reply": "No reply"}));
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = ScriptedProvider::replying("hi");
        let market = Arc::new(MockMarketClient::new());
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app(provider.clone(), Some(market.clone())), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["provider"], "Scripted");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["market_data"], true);
        assert!(provider.prompts().is_empty());
        assert_eq!(market.calls(), 0);
    }
}
