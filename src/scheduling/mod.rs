//! Cooperative scheduling primitives

/// Virtual-time event loop with frame requests, timeouts and cancellation
pub mod event_loop;

pub use event_loop::{EventLoop, TaskHandle};
