//! Shared types for the menu platform
//!
//! Common types used across the client engines: data models, the unified
//! error system, canonical serialization and small utilities.

pub mod canonical;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
