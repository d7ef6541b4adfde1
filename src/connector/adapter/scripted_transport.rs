use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{HttpRequest, HttpResponse, HttpTransport};
use crate::domain::{DomainError, CHAT_PATH, ROOT_PATH};

const MOCK_AGENT_REPLY: &str =
    "This is the mock financial agent. No real account data is available in this mode.";

/// One canned outcome for a request path.
#[derive(Debug, Clone)]
pub struct ScriptedReply {
    outcome: Result<HttpResponse, String>,
    delay: Option<Duration>,
}

impl ScriptedReply {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            outcome: Ok(HttpResponse::new(status, body)),
            delay: None,
        }
    }

    /// `200 OK` with the given body.
    pub fn json(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
            delay: None,
        }
    }

    pub fn refused() -> Self {
        Self::failure("connection refused")
    }

    /// Holds the reply back for `delay` before resolving.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// In-process [`HttpTransport`] that replays scripted replies and records
/// every request it receives.
///
/// Per path, one-shot replies queued with [`with_reply`](Self::with_reply)
/// are consumed first, in order; afterwards the standing reply (if any) is
/// served on every call. A path with nothing left fails like a refused
/// connection.
#[derive(Default)]
pub struct ScriptedTransport {
    queued: Mutex<HashMap<String, VecDeque<ScriptedReply>>>,
    standing: HashMap<String, ScriptedReply>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned agent used by `--mock-agent`: root reports online, every chat
    /// query gets the same answer.
    pub fn mock_agent() -> Self {
        let chat_body = serde_json::json!({ "response": MOCK_AGENT_REPLY, "success": true });
        Self::new()
            .with_standing_reply(
                ROOT_PATH,
                ScriptedReply::json(r#"{"status":"online","orchestrator_available":true}"#),
            )
            .with_standing_reply(CHAT_PATH, ScriptedReply::json(chat_body.to_string()))
    }

    pub fn with_reply(mut self, path: impl Into<String>, reply: ScriptedReply) -> Self {
        self.queued
            .get_mut()
            .entry(path.into())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn with_standing_reply(mut self, path: impl Into<String>, reply: ScriptedReply) -> Self {
        self.standing.insert(path.into(), reply);
        self
    }

    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self, path: &str) -> Option<ScriptedReply> {
        let queued = self
            .queued
            .lock()
            .await
            .get_mut(path)
            .and_then(|replies| replies.pop_front());
        queued.or_else(|| self.standing.get(path).cloned())
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, DomainError> {
        let method = request.method();
        let path = request.path().to_string();
        self.requests.lock().await.push(request);

        let reply = self.next_reply(&path).await.ok_or_else(|| {
            DomainError::transport(format!("no scripted reply for {method} {path}"))
        })?;

        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }

        debug!("scripted {method} {path}");
        reply.outcome.map_err(DomainError::transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_replies_are_served_in_order_then_standing() {
        let transport = ScriptedTransport::new()
            .with_reply("/", ScriptedReply::status(503, ""))
            .with_standing_reply("/", ScriptedReply::status(200, "up"));

        let first = transport.send(HttpRequest::get("/")).await.unwrap();
        let second = transport.send(HttpRequest::get("/")).await.unwrap();
        let third = transport.send(HttpRequest::get("/")).await.unwrap();

        assert_eq!(first.status(), 503);
        assert_eq!(second.body(), "up");
        assert_eq!(third.body(), "up");
        assert_eq!(transport.requests().await.len(), 3);
    }

    #[tokio::test]
    async fn unscripted_path_fails_as_transport_error() {
        let transport = ScriptedTransport::new();
        let err = transport.send(HttpRequest::get("/missing")).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(transport.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn mock_agent_answers_root_and_chat() {
        let transport = ScriptedTransport::mock_agent();
        let root = transport.send(HttpRequest::get(ROOT_PATH)).await.unwrap();
        assert!(root.is_success());

        let request =
            HttpRequest::post_json(CHAT_PATH, &serde_json::json!({ "query": "hi" })).unwrap();
        let chat = transport.send(request).await.unwrap();
        assert!(chat.body().contains("mock financial agent"));
    }
}
