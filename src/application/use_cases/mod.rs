mod check_availability;
mod converse;
mod send_chat_query;

pub use check_availability::*;
pub use converse::*;
pub use send_chat_query::*;
