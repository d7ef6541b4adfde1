mod ask_controller;
mod chat_controller;
mod status_controller;

pub use ask_controller::AskController;
pub use chat_controller::ChatController;
pub use status_controller::StatusController;
