//! # Cell Escape
//!
//! Spatial and interaction core for a small top-down escape game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        CELL ESCAPE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Primitives                              │
//! │  ├── cooldown.rs   - Cooldown timer and clocks               │
//! │  ├── vec2.rs       - Integer positions, facing directions    │
//! │  └── hash.rs       - State hashing for replay checks         │
//! │                                                              │
//! │  game/             - Frame-stepped logic                     │
//! │  ├── bbox.rs       - Bounding boxes                          │
//! │  ├── collision.rs  - Collision registry                      │
//! │  ├── player.rs     - Timer-gated movement                    │
//! │  ├── animation.rs  - Ping-pong walk cycle                    │
//! │  ├── interact.rs   - Interactible objects                    │
//! │  ├── input.rs      - Intents, debouncing, recording          │
//! │  ├── state.rs      - World context                           │
//! │  └── tick.rs       - Frame step and replay                   │
//! │                                                              │
//! │  render.rs         - Render sink seam                        │
//! │  config.rs         - Tunables and world layout               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Nothing in `core/` or `game/` reads the system clock. Every timed
//! decision takes `now` as an argument, so identical intents at identical
//! timestamps give an identical world and identical draw calls.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod render;
pub mod config;

// Re-export commonly used types
pub use crate::core::cooldown::{Clock, Cooldown, ManualClock, Millis, SystemClock};
pub use crate::core::vec2::{Direction, Position};
pub use crate::game::input::{InputIntent, InputState, IntentRecording};
pub use crate::game::state::WorldState;
pub use crate::config::{GameConfig, WorldLayout, ConfigError};
pub use crate::render::{RenderSink, RenderError, FrameBuffer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
