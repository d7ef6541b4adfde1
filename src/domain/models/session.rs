use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// First assistant line of every new session.
pub const GREETING: &str = "Hello! How can I help you with your financial questions today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
    /// Unix time in milliseconds.
    timestamp: i64,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: current_timestamp_millis(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Identifies one chat round trip within a session.
///
/// Tickets are issued in strictly increasing order; only the reply for the
/// most recent ticket may land in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Append-only transcript of one chat session. Lives in memory only.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: String,
    messages: Vec<Message>,
    latest_ticket: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            messages: vec![Message::assistant(GREETING)],
            latest_ticket: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Records the user's input and issues the ticket for its reply.
    pub fn push_user(&mut self, content: impl Into<String>) -> RequestTicket {
        self.messages.push(Message::user(content));
        self.latest_ticket += 1;
        RequestTicket(self.latest_ticket)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest_ticket
    }

    /// Appends the assistant reply for `ticket`, unless a newer request has
    /// been issued since. Returns the appended message.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        content: impl Into<String>,
    ) -> Option<Message> {
        if !self.is_latest(ticket) {
            return None;
        }
        let message = Message::assistant(content);
        self.messages.push(message.clone());
        Some(message)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
