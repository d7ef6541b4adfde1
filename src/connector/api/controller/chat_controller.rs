use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::{Message, Role};

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self) -> Result<String> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.run(stdin, std::io::stdout()).await
    }

    /// Reads one input per line until `/quit`, `/exit` or end of input.
    pub async fn run<R, W>(&self, reader: R, mut out: W) -> Result<String>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let converse = self.container.converse_use_case();
        if !converse.refresh_availability().await {
            writeln!(
                out,
                "Warning: the financial agent service at {} is not reachable.",
                self.container.base_url()
            )?;
        }

        for message in converse.transcript().await {
            writeln!(out, "{}", format_message(&message))?;
        }

        let mut reader = reader;
        let mut buf = Vec::new();
        loop {
            write!(out, "you> ")?;
            out.flush()?;

            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                writeln!(out)?;
                break;
            }
            // Input is unconstrained; invalid UTF-8 is replaced, not fatal.
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);

            match line.trim() {
                "/quit" | "/exit" => break,
                "/history" => {
                    for message in converse.transcript().await {
                        writeln!(out, "{}", format_message(&message))?;
                    }
                    continue;
                }
                _ => {}
            }

            if let Some(reply) = converse.submit(line).await {
                writeln!(out, "{}", format_message(&reply))?;
            }
        }

        let count = converse.transcript().await.len();
        Ok(format!("Session ended ({count} messages)."))
    }
}

fn format_message(message: &Message) -> String {
    match message.role() {
        Role::User => format!("you> {}", message.content()),
        Role::Assistant => format!("assistant> {}", message.content()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::connector::{ScriptedReply, ScriptedTransport};
    use crate::domain::{CHAT_PATH, GREETING, ROOT_PATH};

    fn container(transport: ScriptedTransport) -> Container {
        Container::with_transport(Arc::new(transport), "http://test")
    }

    #[tokio::test]
    async fn answers_each_line_until_quit() {
        let container = container(
            ScriptedTransport::new()
                .with_reply(ROOT_PATH, ScriptedReply::status(200, ""))
                .with_reply(
                    CHAT_PATH,
                    ScriptedReply::json(r#"{"response":"Your balance is $100.","success":true}"#),
                ),
        );
        let input: &[u8] = b"What is my balance?\n\n/quit\nnever sent\n";
        let mut out = Vec::new();

        let summary = ChatController::new(&container)
            .run(input, &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains(&format!("assistant> {GREETING}")));
        assert!(printed.contains("assistant> Your balance is $100."));
        assert_eq!(summary, "Session ended (3 messages).");
    }

    #[tokio::test]
    async fn history_replays_transcript() {
        let container = container(
            ScriptedTransport::new()
                .with_reply(ROOT_PATH, ScriptedReply::status(200, ""))
                .with_reply(CHAT_PATH, ScriptedReply::json(r#"{"response":"ok","success":true}"#)),
        );
        let input: &[u8] = b"hello\n/history\n";
        let mut out = Vec::new();

        ChatController::new(&container).run(input, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("you> hello").count(), 1);
        assert_eq!(printed.matches("assistant> ok").count(), 2);
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_end_session() {
        let container = container(
            ScriptedTransport::new()
                .with_reply(ROOT_PATH, ScriptedReply::status(200, ""))
                .with_standing_reply(
                    CHAT_PATH,
                    ScriptedReply::json(r#"{"response":"ok","success":true}"#),
                ),
        );
        let input: &[u8] = b"caf\xe9\nhello\n";
        let mut out = Vec::new();

        let summary = ChatController::new(&container)
            .run(input, &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("assistant> ok").count(), 2);
        assert_eq!(summary, "Session ended (5 messages).");
    }

    #[tokio::test]
    async fn crlf_line_endings_are_stripped() {
        let container = container(
            ScriptedTransport::new().with_reply(ROOT_PATH, ScriptedReply::status(200, "")),
        );
        let input: &[u8] = b"/quit\r\nnever sent\n";
        let mut out = Vec::new();

        let summary = ChatController::new(&container)
            .run(input, &mut out)
            .await
            .unwrap();
        assert_eq!(summary, "Session ended (1 messages).");
    }

    #[tokio::test]
    async fn warns_when_service_is_down() {
        let container =
            container(ScriptedTransport::new().with_reply(ROOT_PATH, ScriptedReply::refused()));
        let input: &[u8] = b"";
        let mut out = Vec::new();

        ChatController::new(&container).run(input, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Warning: the financial agent service at http://test"));
    }
}
