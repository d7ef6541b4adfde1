use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{HttpRequest, HttpTransport};
use crate::domain::{ChatRequest, ChatResponse, DomainError, CHAT_PATH};

/// Sends one query to the agent service and normalizes the outcome.
///
/// [`send`](Self::send) never fails: transport errors, non-2xx statuses and
/// undecodable bodies all come back as a `success: false` [`ChatResponse`]
/// carrying the fixed fallback text. The underlying error is only logged.
/// [`try_send`](Self::try_send) performs the same request but hands the
/// failure kind back to the caller.
///
/// One call issues exactly one request. There is no retry, no caching and
/// no cancellation; callers that need at-most-one-in-flight enforce it
/// themselves.
pub struct SendChatQueryUseCase {
    transport: Arc<dyn HttpTransport>,
}

impl SendChatQueryUseCase {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn send(&self, query: &str) -> ChatResponse {
        match self.try_send(query).await {
            Ok(response) => response,
            Err(DomainError::MalformedResponse(reason)) => {
                warn!("Chat endpoint returned an unreadable reply: {reason}");
                ChatResponse::malformed_failure()
            }
            Err(e) => {
                warn!("Error sending chat query: {e}");
                ChatResponse::network_failure()
            }
        }
    }

    pub async fn try_send(&self, query: &str) -> Result<ChatResponse, DomainError> {
        let request = HttpRequest::post_json(CHAT_PATH, &ChatRequest::new(query))?;
        debug!("POST {} ({} bytes)", CHAT_PATH, query.len());

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(DomainError::Status(response.status()));
        }

        serde_json::from_str::<ChatResponse>(response.body())
            .map_err(|e| DomainError::malformed(format!("{CHAT_PATH}: {e}")))
    }
}
