//! Core deterministic primitives.
//!
//! Time is always passed in explicitly, so everything built on these types
//! replays identically from the same inputs and frame timings.

pub mod cooldown;
pub mod vec2;
pub mod hash;

// Re-export core types
pub use cooldown::{Clock, Cooldown, ManualClock, Millis, SystemClock};
pub use vec2::{Direction, Position};
pub use hash::{compute_state_hash, Hashable, StateHash, StateHasher};
