//! Game Logic Module
//!
//! Everything that runs inside the frame step. Deterministic given the
//! same intents and timestamps.
//!
//! ## Module Structure
//!
//! - `bbox`: Identified, activatable AABB
//! - `collision`: Ordered box registry with handle-based queries
//! - `player`: Timer-gated movement
//! - `animation`: Ping-pong walk cycle
//! - `interact`: Proximity- and facing-gated world objects
//! - `input`: Per-frame intents, debouncing, recording
//! - `state`: World context object
//! - `tick`: Frame step and replay
//! - `events`: Frame events for logging/replay

pub mod bbox;
pub mod collision;
pub mod player;
pub mod animation;
pub mod interact;
pub mod input;
pub mod state;
pub mod tick;
pub mod events;

// Re-export key types
pub use bbox::BoundingBox;
pub use collision::{BoxHandle, CollisionRegistry};
pub use player::{MoveAttempt, Player};
pub use animation::{Animator, SpriteSet};
pub use interact::{InteractibleObject, ObjectSpec, Lifecycle, DisplayState};
pub use input::{Action, InputIntent, InputState, IntentRecording};
pub use state::WorldState;
pub use tick::{tick, replay, TickResult};
pub use events::{FrameEvent, FrameEventData};
