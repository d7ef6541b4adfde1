//! # Connector Layer
//!
//! Implementations of the transport port and the CLI-facing wiring:
//! - `adapter`: live HTTP via reqwest, plus a scripted in-process fake
//! - `api`: dependency container, router and per-command controllers

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
