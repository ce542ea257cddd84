//! # Pressline Common Library
//!
//! Shared code for the Pressline services including:
//! - Domain models (releases, tracks, requesters)
//! - Event types (ReleaseEvent enum) and the EventBus
//! - Error taxonomy
//! - Configuration loading

pub mod config;
pub mod error;
pub mod events;
pub mod models;

pub use error::{Error, Result};
