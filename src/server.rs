//! HTTP surface for the query pipeline.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Liveness probe, returns `{"status":"ok"}` |
//! | `POST` | `/chat` | Answer a question, returns `{"answer":"..."}` |
//!
//! Each request's pipeline run is fully sequential; the only shared state is
//! the read-only service clients inside [`QueryPipeline`], which are safe for
//! concurrent use. Upstream failures map to a generic 5xx — failure detail
//! goes to stderr, not to the client.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::error::Error;
use crate::query::QueryPipeline;

/// Shared application state: the long-lived query pipeline.
#[derive(Clone)]
struct AppState {
    pipeline: Arc<QueryPipeline>,
}

/// Start the HTTP server and serve until the process is terminated.
pub async fn run_server(pipeline: QueryPipeline, bind: &str) -> anyhow::Result<()> {
    let app = router(Arc::new(pipeline));

    println!("Constitution RAG API listening on http://{}", bind);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(pipeline: Arc<QueryPipeline>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_health))
        .route("/chat", post(handle_chat))
        .layer(cors)
        .with_state(AppState { pipeline })
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Error type that converts into an HTTP response.
#[derive(Debug)]
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Map a pipeline error to a response without leaking internal detail.
///
/// The full error is logged server-side; the client sees only a generic
/// message and a status distinguishing upstream failures from local ones.
fn classify_pipeline_error(err: Error) -> AppError {
    eprintln!("chat request failed: {}", err);
    match err {
        Error::EmbeddingService(_) | Error::IndexService(_) | Error::GenerationService(_) => {
            AppError {
                status: StatusCode::BAD_GATEWAY,
                code: "upstream_error".to_string(),
                message: "upstream service request failed".to_string(),
            }
        }
        Error::Configuration(_) | Error::Extraction(_) => AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal".to_string(),
            message: "internal server error".to_string(),
        },
    }
}

// ============ GET / ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Liveness probe. No side effects.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ============ POST /chat ============

#[derive(Deserialize)]
struct ChatRequest {
    question: String,
}

#[derive(Serialize)]
struct ChatResponse {
    answer: String,
}

/// Answer one question through the query pipeline.
async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(bad_request("question must not be empty"));
    }

    let answer = state
        .pipeline
        .answer_question(question)
        .await
        .map_err(classify_pipeline_error)?;

    Ok(Json(ChatResponse { answer }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::Embedder;
    use crate::error::Result;
    use crate::generate::ChatModel;
    use crate::index::VectorIndex;
    use crate::models::{Match, RecordMetadata, VectorRecord};
    use async_trait::async_trait;

    struct FakeEmbedder;

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0]).collect())
        }
    }

    struct FakeIndex;

    #[async_trait]
    impl VectorIndex for FakeIndex {
        async fn upsert(&self, _records: &[VectorRecord]) -> Result<()> {
            Ok(())
        }
        async fn query(&self, _vector: &[f32], _top_k: usize) -> Result<Vec<Match>> {
            Ok(vec![Match {
                id: "1".to_string(),
                score: 0.95,
                metadata: Some(RecordMetadata {
                    text: "This Constitution shall be the supreme Law of the Land".to_string(),
                }),
            }])
        }
    }

    struct FakeChat;

    #[async_trait]
    impl ChatModel for FakeChat {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Ok("The Constitution is the supreme law of the land.".to_string())
        }
    }

    struct BrokenChat;

    #[async_trait]
    impl ChatModel for BrokenChat {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
            Err(Error::GenerationService("model unavailable".to_string()))
        }
    }

    fn state_with_chat(chat: Box<dyn ChatModel>) -> AppState {
        AppState {
            pipeline: Arc::new(QueryPipeline::new(
                Box::new(FakeEmbedder),
                Box::new(FakeIndex),
                chat,
                5,
            )),
        }
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(body) = handle_health().await;
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn chat_returns_the_pipeline_answer() {
        let state = state_with_chat(Box::new(FakeChat));
        let Json(body) = handle_chat(
            State(state),
            Json(ChatRequest {
                question: "What is the supreme law of the land?".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(!body.answer.is_empty());
    }

    #[tokio::test]
    async fn blank_question_is_a_bad_request() {
        let state = state_with_chat(Box::new(FakeChat));
        let err = handle_chat(
            State(state),
            Json(ChatRequest {
                question: "   ".to_string(),
            }),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "bad_request");
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_generic_502() {
        let state = state_with_chat(Box::new(BrokenChat));
        let err = handle_chat(
            State(state),
            Json(ChatRequest {
                question: "Who vetoes bills?".to_string(),
            }),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.message, "upstream service request failed");
        assert!(!err.message.contains("model unavailable"));
    }
}
