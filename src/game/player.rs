//! Player Actor
//!
//! Timer-gated movement for the controllable actor. The actor's bounding box
//! lives in the collision registry and is reached through a [`BoxHandle`].

use serde::{Serialize, Deserialize};
use tracing::trace;

use crate::core::cooldown::{Cooldown, Millis};
use crate::core::vec2::{Direction, Position};
use crate::game::animation::{Animator, SpriteSet};
use crate::game::bbox::BoundingBox;
use crate::game::collision::{BoxHandle, CollisionRegistry};

/// Id of the player's bounding box.
pub const PLAYER_BOX_ID: &str = "player";

/// Movement delay at speed 1.
pub const MOVE_DELAY_BASE_MS: Millis = 100;

/// Movement cooldown for a speed: `max(1, 100 / speed)`.
///
/// A speed of zero is treated as 1.
#[inline]
pub fn move_delay_ms(speed: u32) -> Millis {
    (MOVE_DELAY_BASE_MS / speed.max(1) as Millis).max(1)
}

/// Outcome of [`Player::attempt_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveAttempt {
    /// No movement intent
    Idle,
    /// Displacement applied, cooldown reset
    Committed,
    /// Intent present but the cooldown had not elapsed; nothing applied
    Throttled,
}

impl MoveAttempt {
    /// The "moved" signal that drives the walk animation.
    ///
    /// True whenever intent was present, even if the cooldown suppressed
    /// the displacement. Animation cadence is decoupled from movement cadence.
    #[inline]
    pub fn reports_moved(self) -> bool {
        !matches!(self, MoveAttempt::Idle)
    }

    /// Did the position actually change?
    #[inline]
    pub fn committed(self) -> bool {
        matches!(self, MoveAttempt::Committed)
    }
}

/// State of the controllable actor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Logical position (top-left of the sprite)
    pub position: Position,

    /// Current facing direction
    pub facing: Direction,

    /// Walk cycle state
    pub animation: Animator,

    speed: u32,
    move_cooldown: Cooldown,
    bbox: BoxHandle,
    bbox_offset: Position,
}

impl Player {
    /// Create a player around an already registered box.
    pub fn new(
        position: Position,
        speed: u32,
        bbox: BoxHandle,
        sprites: &SpriteSet,
        frame_ms: Millis,
        now: Millis,
    ) -> Self {
        Self {
            position,
            facing: Direction::Down,
            animation: Animator::new(sprites, frame_ms, now),
            speed,
            move_cooldown: Cooldown::new(move_delay_ms(speed), now),
            bbox,
            bbox_offset: Position::ZERO,
        }
    }

    /// Register a square box for the player and create it.
    pub fn spawn(
        registry: &mut CollisionRegistry,
        position: Position,
        speed: u32,
        box_size: i32,
        sprites: &SpriteSet,
        frame_ms: Millis,
        now: Millis,
    ) -> Self {
        let bbox = registry.add(BoundingBox::new(
            position.x,
            position.y,
            box_size,
            box_size,
            PLAYER_BOX_ID,
        ));
        Self::new(position, speed, bbox, sprites, frame_ms, now)
    }

    /// Pixels per committed step.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Change speed and restart the movement cooldown at `now`.
    pub fn set_speed(&mut self, speed: u32, now: Millis) {
        self.speed = speed;
        self.move_cooldown = Cooldown::new(move_delay_ms(speed), now);
    }

    /// Current movement cooldown period.
    pub fn move_delay_ms(&self) -> Millis {
        self.move_cooldown.duration_ms()
    }

    /// Handle of the player's bounding box.
    pub fn bbox(&self) -> BoxHandle {
        self.bbox
    }

    /// Try to displace the player.
    ///
    /// Zero displacement reports [`MoveAttempt::Idle`]. Otherwise the
    /// displacement is applied only if the movement cooldown has elapsed.
    pub fn attempt_move(&mut self, dx: i32, dy: i32, now: Millis) -> MoveAttempt {
        if dx == 0 && dy == 0 {
            return MoveAttempt::Idle;
        }

        if self.move_cooldown.try_fire(now) {
            self.position = self.position.offset(dx, dy);
            MoveAttempt::Committed
        } else {
            trace!(
                "move throttled, {} ms left",
                self.move_cooldown.remaining(now)
            );
            MoveAttempt::Throttled
        }
    }

    /// Put the bounding box back on the logical position.
    pub fn sync_bbox(&self, registry: &mut CollisionRegistry) -> bool {
        let at = self.position + self.bbox_offset;
        registry.set_position(self.bbox, at.x, at.y)
    }

    /// Advance or idle the walk animation.
    pub fn update_animation(&mut self, moved: bool, sprites: &SpriteSet, now: Millis) {
        self.animation.update(moved, self.facing, sprites, now);
    }

    /// Sprite tag to draw this frame.
    pub fn sprite_tag(&self) -> &str {
        self.animation.current_tag()
    }
}
