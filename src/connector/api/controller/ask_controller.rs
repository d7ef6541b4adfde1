use anyhow::Result;

use crate::ChatResponse;

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, query: String, json: bool) -> Result<String> {
        if json {
            let response = if self.container.availability_use_case().is_available().await {
                self.container.chat_use_case().send(&query).await
            } else {
                ChatResponse::network_failure()
            };
            return Ok(serde_json::to_string_pretty(&response)?);
        }

        let converse = self.container.converse_use_case();
        converse.refresh_availability().await;

        Ok(match converse.submit(&query).await {
            Some(reply) => reply.content().to_string(),
            None => "Nothing to send.".to_string(),
        })
    }
}
