//! # PRD Review Common Library
//!
//! Shared code for the PRD review service and its integration tests:
//! - Error type and result alias
//! - Configuration loading and root folder resolution
//! - Event types (ReviewEvent enum) and the broadcast EventBus
//! - JSON response envelope
//! - SSE helpers and timestamp utilities

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod sse;
pub mod time;

pub use error::{Error, Result};
