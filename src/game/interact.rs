//! Interactible Objects
//!
//! World objects the player can interact with when close enough and facing
//! them. Interacting shows a line of text for a while and may consume the
//! object for good.

use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::core::cooldown::{Cooldown, Millis};
use crate::core::vec2::{Direction, Position};
use crate::game::bbox::BoundingBox;
use crate::game::collision::{BoxHandle, CollisionRegistry};
use crate::game::player::Player;
use crate::render::{Color, RenderSink};

/// Per-axis interaction range in pixels (strict).
pub const INTERACTION_RANGE: u32 = 80;

/// How long interaction text stays on screen.
pub const TEXT_DISPLAY_MS: Millis = 3000;

/// Text is drawn this many pixels above the object.
pub const TEXT_OFFSET_Y: i32 = 20;

/// Lifecycle of an object. `Consumed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Lifecycle {
    /// Drawn, collidable, interactable
    Active = 0,
    /// Gone for the rest of the session
    Consumed = 1,
}

/// Whether the interaction text is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum DisplayState {
    /// Nothing shown
    Idle = 0,
    /// Text visible until the display cooldown elapses
    TextVisible = 1,
}

/// Creation parameters for an interactible object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSpec {
    /// Unique id; the box id is `interactible_<id>`
    pub id: String,
    /// Logical x position
    pub x: i32,
    /// Logical y position
    pub y: i32,
    /// Hitbox width
    pub width: i32,
    /// Hitbox height
    pub height: i32,
    /// Text shown on interaction
    pub text: String,
    /// Sprite tag drawn while active
    pub sprite: String,
    /// Consume the object on first interaction
    #[serde(default)]
    pub disappear_on_interact: bool,
    /// Hitbox x offset from the logical position
    #[serde(default)]
    pub offset_x: i32,
    /// Hitbox y offset from the logical position
    #[serde(default)]
    pub offset_y: i32,
}

/// Box id for an object id.
pub fn object_box_id(id: &str) -> String {
    format!("interactible_{}", id)
}

/// A world object with proximity- and facing-gated interaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InteractibleObject {
    id: String,
    position: Position,
    offset: Position,
    bbox: BoxHandle,
    text: String,
    sprite: String,
    disappear_on_interact: bool,
    lifecycle: Lifecycle,
    display: DisplayState,
    display_cooldown: Cooldown,
    range: u32,
}

impl InteractibleObject {
    /// Register the object's box and create it.
    pub fn spawn(
        registry: &mut CollisionRegistry,
        spec: &ObjectSpec,
        range: u32,
        text_display_ms: Millis,
        now: Millis,
    ) -> Self {
        let position = Position::new(spec.x, spec.y);
        let offset = Position::new(spec.offset_x, spec.offset_y);
        let corner = position + offset;
        let bbox = registry.add(BoundingBox::new(
            corner.x,
            corner.y,
            spec.width,
            spec.height,
            object_box_id(&spec.id),
        ));

        Self {
            id: spec.id.clone(),
            position,
            offset,
            bbox,
            text: spec.text.clone(),
            sprite: spec.sprite.clone(),
            disappear_on_interact: spec.disappear_on_interact,
            lifecycle: Lifecycle::Active,
            display: DisplayState::Idle,
            display_cooldown: Cooldown::new(text_display_ms, now),
            range,
        }
    }

    /// Object id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Logical position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Hitbox offset.
    pub fn offset(&self) -> Position {
        self.offset
    }

    /// Handle of the object's box.
    pub fn bbox(&self) -> BoxHandle {
        self.bbox
    }

    /// Interaction text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Does the object vanish on interaction?
    pub fn disappears_on_interact(&self) -> bool {
        self.disappear_on_interact
    }

    /// Lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Display state.
    pub fn display(&self) -> DisplayState {
        self.display
    }

    /// Still interactable and drawn?
    #[inline]
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// Is the interaction text on screen?
    #[inline]
    pub fn is_showing_text(&self) -> bool {
        self.display == DisplayState::TextVisible
    }

    /// Independent per-axis check, strictly inside the range.
    pub fn within_range(&self, actor: Position) -> bool {
        let (dx, dy) = actor.axis_distance(self.position);
        dx < self.range && dy < self.range
    }

    /// Does the actor face this object?
    pub fn is_facing(&self, actor: Position, facing: Direction) -> bool {
        facing.faces(actor, self.position)
    }

    /// Active, in range, and faced.
    pub fn can_interact(&self, actor: Position, facing: Direction) -> bool {
        self.is_active() && self.within_range(actor) && self.is_facing(actor, facing)
    }

    /// Interact with the object.
    ///
    /// Returns the interaction text, or an empty string once consumed.
    /// A disappearing object is consumed and its box deactivated.
    /// The text display restarts on every call.
    pub fn interact(&mut self, registry: &mut CollisionRegistry, now: Millis) -> String {
        if !self.is_active() {
            return String::new();
        }

        if self.disappear_on_interact {
            self.lifecycle = Lifecycle::Consumed;
            registry.set_active(self.bbox, false);
            info!("object {} consumed", self.id);
        }

        self.display = DisplayState::TextVisible;
        self.display_cooldown.reset(now);

        self.text.clone()
    }

    /// Fire [`interact`](Self::interact) when the intent is set and the
    /// player can interact. No edge detection: a held intent fires every call.
    pub fn handle_interaction(
        &mut self,
        player: &Player,
        interact_intent: bool,
        registry: &mut CollisionRegistry,
        now: Millis,
    ) -> bool {
        if interact_intent && self.can_interact(player.position, player.facing) {
            self.interact(registry, now);
            return true;
        }
        false
    }

    /// Per-frame update. Returns whether the text is still visible.
    pub fn update(&mut self, now: Millis) -> bool {
        if self.is_showing_text() && self.display_cooldown.elapsed(now) {
            self.display = DisplayState::Idle;
        }
        self.is_showing_text()
    }

    /// Draw the sprite (while active) and the text (while visible).
    ///
    /// The sprite is centred on the box, corrected by the offset.
    pub fn draw(&self, registry: &CollisionRegistry, sink: &mut dyn RenderSink) {
        if self.is_active() {
            if let Some(bbox) = registry.get(self.bbox) {
                let cx = bbox.x + bbox.width / 2 - self.offset.x;
                let cy = bbox.y + bbox.height / 2 - self.offset.y;
                if let Err(e) = sink.draw_sprite(cx, cy, &self.sprite) {
                    warn!("object {}: {}", self.id, e);
                }
            }
        }

        if self.is_showing_text() {
            sink.draw_text(
                self.position.x,
                self.position.y - TEXT_OFFSET_Y,
                &self.text,
                Color::Yellow,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::animation::SpriteSet;
    use crate::render::{DrawCommand, FrameBuffer};

    fn key_spec() -> ObjectSpec {
        ObjectSpec {
            id: "key".to_string(),
            x: 380,
            y: 280,
            width: 20,
            height: 50,
            text: "You found a key!".to_string(),
            sprite: "IN1".to_string(),
            disappear_on_interact: true,
            offset_x: 0,
            offset_y: 0,
        }
    }

    fn door_spec() -> ObjectSpec {
        ObjectSpec {
            id: "door".to_string(),
            x: 600,
            y: 500,
            width: 70,
            height: 70,
            text: "The key doesn't work".to_string(),
            sprite: "IN2".to_string(),
            disappear_on_interact: false,
            offset_x: 15,
            offset_y: -5,
        }
    }

    fn spawn(spec: &ObjectSpec) -> (InteractibleObject, CollisionRegistry) {
        let mut registry = CollisionRegistry::new();
        let obj = InteractibleObject::spawn(&mut registry, spec, INTERACTION_RANGE, TEXT_DISPLAY_MS, 0);
        (obj, registry)
    }

    #[test]
    fn test_range_boundary_is_exclusive() {
        let (key, _) = spawn(&key_spec());

        let at_80 = Position::new(380, 200);
        assert!(key.is_facing(at_80, Direction::Down));
        assert!(!key.within_range(at_80));
        assert!(!key.can_interact(at_80, Direction::Down));

        let at_79 = Position::new(380, 201);
        assert!(key.within_range(at_79));
        assert!(key.can_interact(at_79, Direction::Down));
    }

    #[test]
    fn test_range_is_per_axis() {
        let (key, _) = spawn(&key_spec());
        // Diagonal 79/79 is in range even though its Euclidean distance is > 80
        assert!(key.within_range(Position::new(301, 201)));
        assert!(!key.within_range(Position::new(300, 279)));
    }

    #[test]
    fn test_facing_half_planes() {
        let (key, _) = spawn(&key_spec());
        let above = Position::new(380, 250);
        let below = Position::new(380, 310);
        let left_of = Position::new(350, 280);
        let right_of = Position::new(410, 280);

        assert!(key.can_interact(above, Direction::Down));
        assert!(!key.can_interact(above, Direction::Up));
        assert!(key.can_interact(below, Direction::Up));
        assert!(key.can_interact(left_of, Direction::Right));
        assert!(!key.can_interact(left_of, Direction::Left));
        assert!(key.can_interact(right_of, Direction::Left));
    }

    #[test]
    fn test_consumption_is_idempotent() {
        let (mut key, mut registry) = spawn(&key_spec());

        assert_eq!(key.interact(&mut registry, 10), "You found a key!");
        assert_eq!(key.lifecycle(), Lifecycle::Consumed);
        assert!(!registry.get(key.bbox()).unwrap().is_active());
        assert!(key.is_showing_text());

        assert_eq!(key.interact(&mut registry, 20), "");
        assert_eq!(key.lifecycle(), Lifecycle::Consumed);
        assert!(!key.can_interact(Position::new(380, 250), Direction::Down));
    }

    #[test]
    fn test_consumed_box_leaves_queries() {
        let (mut key, mut registry) = spawn(&key_spec());
        assert!(registry.first_point_hit(385, 300).is_some());

        key.interact(&mut registry, 0);
        assert!(registry.first_point_hit(385, 300).is_none());
        let probe = BoundingBox::new(370, 270, 40, 40, "probe");
        assert!(registry.first_collision_with(&probe).is_none());
    }

    #[test]
    fn test_persistent_object_refires() {
        let (mut door, mut registry) = spawn(&door_spec());

        assert_eq!(door.interact(&mut registry, 0), "The key doesn't work");
        assert_eq!(door.interact(&mut registry, 1000), "The key doesn't work");
        assert!(door.is_active());
        assert!(registry.get(door.bbox()).unwrap().is_active());

        // Display restarted at 1000, so still visible at 3500
        assert!(door.update(3500));
        assert!(!door.update(4000));
        assert_eq!(door.display(), DisplayState::Idle);
    }

    #[test]
    fn test_text_display_times_out() {
        let (mut door, mut registry) = spawn(&door_spec());
        assert!(!door.update(0));

        door.interact(&mut registry, 100);
        assert!(door.update(100));
        assert!(door.update(3099));
        assert!(!door.update(3100));
        assert!(!door.is_showing_text());
    }

    #[test]
    fn test_box_uses_offset() {
        let (door, registry) = spawn(&door_spec());
        let bbox = registry.get(door.bbox()).unwrap();

        assert_eq!(bbox.id(), "interactible_door");
        assert_eq!(bbox.top_left(), Position::new(615, 495));
    }

    #[test]
    fn test_handle_interaction_requires_intent() {
        let (mut key, mut registry) = spawn(&key_spec());
        let sprites = SpriteSet::default();
        let mut player = Player::spawn(&mut registry, Position::new(380, 230), 5, 64, &sprites, 75, 0);
        player.facing = Direction::Down;

        assert!(!key.handle_interaction(&player, false, &mut registry, 0));
        assert!(key.is_active());

        assert!(key.handle_interaction(&player, true, &mut registry, 0));
        assert!(!key.is_active());

        // Consumed: nothing more to do
        assert!(!key.handle_interaction(&player, true, &mut registry, 16));
    }

    #[test]
    fn test_draw_centres_sprite_and_places_text() {
        let (mut door, mut registry) = spawn(&door_spec());
        let mut fb = FrameBuffer::new();

        door.draw(&registry, &mut fb);
        // box (615,495) 70x70 -> centre (650,530), minus offset (15,-5)
        assert_eq!(
            fb.take_commands(),
            vec![DrawCommand::Sprite { x: 635, y: 535, tag: "IN2".to_string() }]
        );

        door.interact(&mut registry, 0);
        door.draw(&registry, &mut fb);
        assert_eq!(fb.texts(), vec!["The key doesn't work"]);
        assert!(fb.commands().contains(&DrawCommand::Text {
            x: 600,
            y: 480,
            text: "The key doesn't work".to_string(),
            color: Color::Yellow,
        }));
    }

    #[test]
    fn test_consumed_object_draws_text_only() {
        let (mut key, mut registry) = spawn(&key_spec());
        let mut fb = FrameBuffer::new();

        key.interact(&mut registry, 0);
        key.draw(&registry, &mut fb);
        assert!(fb.sprite_tags().is_empty());
        assert_eq!(fb.texts(), vec!["You found a key!"]);

        key.update(TEXT_DISPLAY_MS);
        fb.take_commands();
        key.draw(&registry, &mut fb);
        assert!(fb.commands().is_empty());
    }

    #[test]
    fn test_unknown_sprite_is_skipped() {
        let (key, registry) = spawn(&key_spec());
        let mut fb = FrameBuffer::with_catalog(["IN2"]);
        key.draw(&registry, &mut fb);
        assert!(fb.commands().is_empty());
    }
}
