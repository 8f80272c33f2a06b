//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input (held-key queries, quit requests)
//! - Time (fixed-step accumulation, blocking frame pacing on native)

pub mod input;
pub mod time;

pub use input::{InputSource, Key, KeyboardState, poll};
#[cfg(not(target_arch = "wasm32"))]
pub use time::FrameClock;
pub use time::FixedStep;
