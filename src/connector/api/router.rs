use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, ChatController, StatusController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    status_controller: StatusController<'a>,
    chat_controller: ChatController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            status_controller: StatusController::new(container),
            chat_controller: ChatController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask { query, json } => self.ask_controller.ask(query, json).await,
            Commands::Status => self.status_controller.status().await,
            Commands::Chat => self.chat_controller.chat().await,
        }
    }
}
