//! # Application Layer
//!
//! Use cases built on the transport port. Nothing here knows which HTTP
//! client sits behind [`HttpTransport`].

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
