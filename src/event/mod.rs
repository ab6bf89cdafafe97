//! Event model carried by clients of the selector.
//!
//! Plain values: no concurrency or failure semantics.

pub mod model;

pub use model::{EventError, StreamEvent, StreamEventBuilder, StreamSchema};
