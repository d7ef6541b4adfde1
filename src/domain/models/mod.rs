mod chat;
mod session;
mod status;

pub use chat::*;
pub use session::*;
pub use status::*;
