//! Data models
//!
//! Shared between the client engines and the UI layer. Persisted cart JSON
//! uses camelCase field names (the stored snapshot format); everything else
//! follows Rust naming with SCREAMING_SNAKE_CASE enum tags.

pub mod cart;
pub mod catalog;
pub mod hours;
pub mod menu;
pub mod service;

// Re-exports
pub use cart::*;
pub use catalog::*;
pub use hours::*;
pub use menu::*;
pub use service::*;
