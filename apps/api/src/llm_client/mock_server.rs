//! Throwaway chat-completions endpoint for judge tests.
//!
//! Binds an Axum router to an ephemeral loopback port, records every request and
//! answers with whatever the responder closure picks for the incoming prompt.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

/// A request as the mock endpoint saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub body: Value,
    pub authorization: Option<String>,
}

/// Response configuration for one call.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: Value,
}

impl MockReply {
    /// A successful completion whose first choice carries `text`.
    pub fn content(text: &str) -> Self {
        Self {
            status: 200,
            body: json!({
                "choices": [{ "message": { "role": "assistant", "content": text } }]
            }),
        }
    }

    /// An error response with the provider's error envelope.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: json!({ "error": { "message": "mock failure" } }),
        }
    }
}

impl IntoResponse for MockReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

type Responder = Arc<dyn Fn(&str) -> MockReply + Send + Sync>;

#[derive(Clone)]
struct MockState {
    responder: Responder,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockJudgeServer {
    addr: SocketAddr,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockJudgeServer {
    /// Replies in order; the last reply repeats once the list is exhausted.
    pub async fn start(replies: Vec<MockReply>) -> Self {
        assert!(!replies.is_empty(), "mock server needs at least one reply");
        let next = AtomicUsize::new(0);
        Self::start_with(move |_prompt| {
            let i = next.fetch_add(1, Ordering::SeqCst).min(replies.len() - 1);
            replies[i].clone()
        })
        .await
    }

    /// Picks each reply from the prompt text.
    pub async fn start_with<F>(responder: F) -> Self
    where
        F: Fn(&str) -> MockReply + Send + Sync + 'static,
    {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            responder: Arc::new(responder),
            recorded: recorded.clone(),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(handle_completion))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            recorded,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/v1/chat/completions", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }
}

impl Drop for MockJudgeServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_completion(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> MockReply {
    let prompt = body["messages"][0]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    state.recorded.lock().unwrap().push(RecordedRequest {
        body,
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    });

    (state.responder)(&prompt)
}
