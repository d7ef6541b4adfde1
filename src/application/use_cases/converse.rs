use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{CheckAvailabilityUseCase, SendChatQueryUseCase};
use crate::domain::{ChatSession, Message};

/// Assistant reply used when the last probe found the service down.
pub const UNAVAILABLE_MESSAGE: &str =
    "Sorry, I couldn't connect to the financial agent service. Please try again later.";

/// Owns a chat session and drives one round trip per submitted input.
///
/// The session lock is held only while the transcript is touched, never
/// across the network call, so a second submit can start while the first is
/// still waiting. Each round trip carries a ticket and only the reply for the
/// newest ticket is appended; an older reply arriving late is dropped.
pub struct ConverseUseCase {
    chat: SendChatQueryUseCase,
    prober: CheckAvailabilityUseCase,
    session: Mutex<ChatSession>,
    available: AtomicBool,
}

impl ConverseUseCase {
    pub fn new(chat: SendChatQueryUseCase, prober: CheckAvailabilityUseCase) -> Self {
        Self {
            chat,
            prober,
            session: Mutex::new(ChatSession::new()),
            // Assume reachable until the first probe says otherwise.
            available: AtomicBool::new(true),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Probes the service and remembers the answer for later submits.
    pub async fn refresh_availability(&self) -> bool {
        let available = self.prober.is_available().await;
        debug!("API available: {available}");
        self.available.store(available, Ordering::SeqCst);
        available
    }

    /// Sends `input` and returns the assistant message it produced.
    ///
    /// Blank input is ignored. `None` is also returned when a newer submit
    /// overtook this one and its reply was discarded.
    pub async fn submit(&self, input: &str) -> Option<Message> {
        if input.trim().is_empty() {
            return None;
        }

        let ticket = {
            let mut session = self.session.lock().await;
            let ticket = session.push_user(input);
            debug!("session {} issued ticket {}", session.id(), ticket.value());
            ticket
        };

        let content = if self.is_available() {
            self.chat.send(input).await.assistant_text().to_string()
        } else {
            UNAVAILABLE_MESSAGE.to_string()
        };

        let mut session = self.session.lock().await;
        let appended = session.complete(ticket, content);
        if appended.is_none() {
            debug!(
                "session {} dropped stale reply for ticket {}",
                session.id(),
                ticket.value()
            );
        }
        appended
    }

    pub async fn transcript(&self) -> Vec<Message> {
        self.session.lock().await.messages().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::application::HttpTransport;
    use crate::connector::{ScriptedReply, ScriptedTransport};
    use crate::domain::{Role, CHAT_PATH, FALLBACK_RESPONSE, GREETING, ROOT_PATH};

    fn converse(transport: Arc<ScriptedTransport>) -> ConverseUseCase {
        let transport: Arc<dyn HttpTransport> = transport;
        ConverseUseCase::new(
            SendChatQueryUseCase::new(transport.clone()),
            CheckAvailabilityUseCase::new(transport),
        )
    }

    #[tokio::test]
    async fn successful_round_trip_appends_user_then_assistant() {
        let transport = Arc::new(ScriptedTransport::new().with_reply(
            CHAT_PATH,
            ScriptedReply::json(r#"{"response":"Your balance is $100.","success":true}"#),
        ));
        let converse = converse(transport);

        let reply = converse.submit("What is my balance?").await;
        assert_eq!(reply.map(|m| m.content().to_string()).as_deref(), Some("Your balance is $100."));

        let transcript = converse.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].content(), GREETING);
        assert_eq!(transcript[1].role(), Role::User);
        assert_eq!(transcript[1].content(), "What is my balance?");
        assert_eq!(transcript[2].role(), Role::Assistant);
    }

    #[tokio::test]
    async fn blank_input_is_ignored_without_a_request() {
        let transport = Arc::new(ScriptedTransport::new());
        let converse = converse(transport.clone());

        assert!(converse.submit("   \n").await.is_none());
        assert_eq!(converse.transcript().await.len(), 1);
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn user_message_keeps_untrimmed_input() {
        let transport = Arc::new(ScriptedTransport::new().with_reply(
            CHAT_PATH,
            ScriptedReply::json(r#"{"response":"hi","success":true}"#),
        ));
        let converse = converse(transport);
        converse.submit("  hello  ").await;
        assert_eq!(converse.transcript().await[1].content(), "  hello  ");
    }

    #[tokio::test]
    async fn failed_chat_shows_fallback() {
        let transport =
            Arc::new(ScriptedTransport::new().with_reply(CHAT_PATH, ScriptedReply::refused()));
        let converse = converse(transport);

        let reply = converse.submit("anything").await;
        assert_eq!(reply.map(|m| m.content().to_string()).as_deref(), Some(FALLBACK_RESPONSE));
    }

    #[tokio::test]
    async fn unavailable_service_skips_chat_call() {
        let transport = Arc::new(
            ScriptedTransport::new().with_reply(ROOT_PATH, ScriptedReply::status(503, "")),
        );
        let converse = converse(transport.clone());

        assert!(!converse.refresh_availability().await);
        let reply = converse.submit("hello").await;
        assert_eq!(reply.map(|m| m.content().to_string()).as_deref(), Some(UNAVAILABLE_MESSAGE));

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path(), ROOT_PATH);
    }

    #[tokio::test]
    async fn stale_reply_is_dropped_when_overtaken() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .with_reply(
                    CHAT_PATH,
                    ScriptedReply::json(r#"{"response":"slow","success":true}"#)
                        .after(Duration::from_millis(100)),
                )
                .with_reply(
                    CHAT_PATH,
                    ScriptedReply::json(r#"{"response":"fast","success":true}"#),
                ),
        );
        let converse = converse(transport);

        let (first, second) = tokio::join!(converse.submit("first"), converse.submit("second"));
        assert!(first.is_none());
        assert_eq!(second.map(|m| m.content().to_string()).as_deref(), Some("fast"));

        let contents: Vec<String> = converse
            .transcript()
            .await
            .iter()
            .map(|m| m.content().to_string())
            .collect();
        assert_eq!(contents, vec![GREETING, "first", "second", "fast"]);
    }
}
