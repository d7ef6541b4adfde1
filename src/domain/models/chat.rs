use serde::{Deserialize, Serialize};

/// Path of the chat endpoint on the agent service.
pub const CHAT_PATH: &str = "/api/chat";

/// Path probed to decide whether the agent service is reachable.
pub const ROOT_PATH: &str = "/";

/// Reply text shown whenever a chat round trip fails.
pub const FALLBACK_RESPONSE: &str = "Sorry, there was an error processing your request.";

/// `error` value for transport failures and non-success statuses.
pub const NETWORK_ERROR: &str = "Network error or service unavailable";

/// `error` value for a 2xx reply whose body is not a chat response.
pub const MALFORMED_ERROR: &str = "Malformed response from service";

/// Outbound payload of `POST /api/chat`.
///
/// `query` is forwarded exactly as typed: no trimming, no length checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

impl ChatRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// The only reply shape the agent service speaks.
///
/// `success == true` means `response` holds assistant text. Otherwise
/// `response` is a user-facing fallback and `error` may name the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn answered(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            success: true,
            error: None,
        }
    }

    /// Synthesized reply for a failed round trip.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            response: FALLBACK_RESPONSE.to_string(),
            success: false,
            error: Some(error.into()),
        }
    }

    pub fn network_failure() -> Self {
        Self::failed(NETWORK_ERROR)
    }

    pub fn malformed_failure() -> Self {
        Self::failed(MALFORMED_ERROR)
    }

    /// Text to show as the assistant's reply.
    ///
    /// A reply that reports `success: false` is always shown as the fixed
    /// fallback, whatever the service put in `response`.
    pub fn assistant_text(&self) -> &str {
        if self.success {
            &self.response
        } else {
            FALLBACK_RESPONSE
        }
    }
}
