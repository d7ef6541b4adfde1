//! # Domain Layer
//!
//! Wire models of the financial agent service, the chat session model
//! and the error type shared by every layer.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
