//! World State
//!
//! The single context object owning the player, the objects and the
//! collision registry. Threaded through every frame step.

use tracing::info;

use crate::config::{GameConfig, WorldLayout};
use crate::core::cooldown::Millis;
use crate::core::hash::{StateHash, compute_state_hash};
use crate::core::vec2::Position;
use crate::game::animation::SpriteSet;
use crate::game::bbox::BoundingBox;
use crate::game::collision::CollisionRegistry;
use crate::game::interact::InteractibleObject;
use crate::game::player::Player;

/// Complete world state.
#[derive(Clone, Debug)]
pub struct WorldState {
    /// Frames stepped so far
    pub frame: u64,

    /// The controllable actor
    pub player: Player,

    /// Objects in registration order
    pub objects: Vec<InteractibleObject>,

    /// All boxes: walls, then the player, then objects
    pub registry: CollisionRegistry,

    /// Tunables
    pub config: GameConfig,

    /// Player sprites
    pub sprites: SpriteSet,

    /// Background sprite tag
    pub background: String,

    /// Banner lines with their positions
    pub banner: Vec<(Position, String)>,
}

impl WorldState {
    /// Build the world. Walls are registered first, then the player's box,
    /// then one box per object, which fixes the collision query order.
    pub fn from_layout(layout: &WorldLayout, config: &GameConfig, now: Millis) -> Self {
        let mut registry = CollisionRegistry::new();

        for wall in &layout.walls {
            registry.add(BoundingBox::new(wall.x, wall.y, wall.width, wall.height, wall.id.as_str()));
        }

        let player = Player::spawn(
            &mut registry,
            layout.player_spawn,
            config.player_speed,
            config.player_box_size,
            &layout.sprites,
            config.animation_frame_ms,
            now,
        );

        let objects = layout
            .objects
            .iter()
            .map(|spec| {
                InteractibleObject::spawn(
                    &mut registry,
                    spec,
                    config.interaction_range,
                    config.text_display_ms,
                    now,
                )
            })
            .collect::<Vec<_>>();

        info!(
            "World built: {} walls, {} objects, player at {}",
            layout.walls.len(),
            objects.len(),
            layout.player_spawn
        );

        Self {
            frame: 0,
            player,
            objects,
            registry,
            config: config.clone(),
            sprites: layout.sprites.clone(),
            background: layout.background.clone(),
            banner: layout
                .banner_lines()
                .map(|(at, line)| (at, line.to_string()))
                .collect(),
        }
    }

    /// Object by id.
    pub fn object(&self, id: &str) -> Option<&InteractibleObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// The player's registered box.
    pub fn player_box(&self) -> Option<&BoundingBox> {
        self.registry.get(self.player.bbox())
    }

    /// Objects still in play.
    pub fn active_object_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_active()).count()
    }

    /// Compute deterministic hash of the world.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.frame, |hasher| {
            let anim = &self.player.animation;
            hasher
                .update(&self.player.position)
                .update(&self.player.facing)
                .update(&(anim.frame() as u32))
                .update(&anim.step());

            for object in &self.objects {
                let box_active = self
                    .registry
                    .get(object.bbox())
                    .is_some_and(|b| b.is_active());
                hasher
                    .update(object.id())
                    .update(&(object.lifecycle() as u8))
                    .update(&(object.display() as u8))
                    .update(&box_active);
            }
        })
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::from_layout(&WorldLayout::default(), &GameConfig::default(), 0)
    }
}
