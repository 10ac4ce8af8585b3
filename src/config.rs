//! Configuration
//!
//! [`GameConfig`] holds the tunable constants, [`WorldLayout`] the initial
//! world. Both default to the stock cell and can be overridden from the
//! environment or a JSON file respectively.

use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;

use crate::core::cooldown::Millis;
use crate::core::vec2::Position;
use crate::game::animation::{SpriteSet, ANIMATION_FRAME_MS};
use crate::game::input::KEY_DEBOUNCE_MS;
use crate::game::interact::{ObjectSpec, INTERACTION_RANGE, TEXT_DISPLAY_MS};
use crate::game::player::PLAYER_BOX_ID;

/// Banner text origin.
pub const BANNER_ORIGIN: Position = Position::new(30, 40);

/// Vertical distance between banner lines.
pub const BANNER_LINE_HEIGHT: i32 = 20;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layout file could not be read.
    #[error("Failed to read layout: {0}")]
    Io(#[from] std::io::Error),

    /// Layout JSON is malformed.
    #[error("Failed to parse layout: {0}")]
    Parse(#[from] serde_json::Error),

    /// Environment override is not a valid value.
    #[error("Invalid value for {var}: {value:?}")]
    Env {
        /// Variable name
        var: String,
        /// Offending value
        value: String,
    },

    /// Values parse but make no sense.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// GAME CONFIG
// =============================================================================

/// Tunable constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen width in pixels
    pub screen_width: u32,
    /// Screen height in pixels
    pub screen_height: u32,
    /// Pixels per committed step
    pub player_speed: u32,
    /// Side of the player's square box
    pub player_box_size: i32,
    /// Animation frame pacing
    pub animation_frame_ms: Millis,
    /// Interaction text lifetime
    pub text_display_ms: Millis,
    /// Per-action debounce window
    pub key_debounce_ms: Millis,
    /// Per-axis interaction range (strict)
    pub interaction_range: u32,
    /// Frame period used by scripted runs and replay
    pub frame_ms: Millis,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            player_speed: 5,
            player_box_size: 64,
            animation_frame_ms: ANIMATION_FRAME_MS,
            text_display_ms: TEXT_DISPLAY_MS,
            key_debounce_ms: KEY_DEBOUNCE_MS,
            interaction_range: INTERACTION_RANGE,
            frame_ms: 16,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `CELL_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `CELL_*` name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        override_from(&lookup, "CELL_SCREEN_WIDTH", &mut config.screen_width)?;
        override_from(&lookup, "CELL_SCREEN_HEIGHT", &mut config.screen_height)?;
        override_from(&lookup, "CELL_PLAYER_SPEED", &mut config.player_speed)?;
        override_from(&lookup, "CELL_PLAYER_BOX_SIZE", &mut config.player_box_size)?;
        override_from(&lookup, "CELL_ANIMATION_FRAME_MS", &mut config.animation_frame_ms)?;
        override_from(&lookup, "CELL_TEXT_DISPLAY_MS", &mut config.text_display_ms)?;
        override_from(&lookup, "CELL_KEY_DEBOUNCE_MS", &mut config.key_debounce_ms)?;
        override_from(&lookup, "CELL_INTERACTION_RANGE", &mut config.interaction_range)?;
        override_from(&lookup, "CELL_FRAME_MS", &mut config.frame_ms)?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the frame step cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_box_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "player_box_size must be positive, got {}",
                self.player_box_size
            )));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::Invalid("frame_ms must be positive".to_string()));
        }
        Ok(())
    }
}

fn override_from<F, T>(lookup: &F, var: &str, field: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(value) = lookup(var) {
        *field = value.trim().parse().map_err(|_| ConfigError::Env {
            var: var.to_string(),
            value: value.clone(),
        })?;
        debug!("{} overridden to {:?}", var, value);
    }
    Ok(())
}

// =============================================================================
// WORLD LAYOUT
// =============================================================================

/// A static wall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Box id
    pub id: String,
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl BoxSpec {
    /// Create a wall spec.
    pub fn new(id: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { id: id.into(), x, y, width, height }
    }
}

/// Initial world: walls, objects, spawn point and the art to draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    /// Player spawn position
    pub player_spawn: Position,
    /// Static walls, registered first
    pub walls: Vec<BoxSpec>,
    /// Interactible objects, registered after the player
    pub objects: Vec<ObjectSpec>,
    /// Player sprites
    pub sprites: SpriteSet,
    /// Background sprite drawn at the origin
    pub background: String,
    /// White banner lines drawn from [`BANNER_ORIGIN`]
    pub banner: Vec<String>,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            player_spawn: Position::new(640, 360),
            walls: vec![
                BoxSpec::new("boundary_top", -100, -20, 1480, 20),
                BoxSpec::new("boundary_bottom", -100, 595, 1480, 20),
                BoxSpec::new("boundary_left", 20, -110, 20, 920),
                BoxSpec::new("boundary_right", 1140, -100, 20, 920),
            ],
            objects: vec![
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
                },
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
                },
            ],
            sprites: SpriteSet::default(),
            background: "BG".to_string(),
            banner: vec![
                "Oh No! You have found yourself trapped in a cell!".to_string(),
                "How will you escape?".to_string(),
            ],
        }
    }
}

impl WorldLayout {
    /// Parse and validate a JSON layout. Missing fields take the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Read, parse and validate a JSON layout file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check ids and sizes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        seen.insert(PLAYER_BOX_ID.to_string());

        let walls = self.walls.iter().map(|w| (&w.id, w.width, w.height));
        let objects = self.objects.iter().map(|o| (&o.id, o.width, o.height));

        for (id, width, height) in walls.chain(objects) {
            if id.is_empty() {
                return Err(ConfigError::Invalid("empty id".to_string()));
            }
            if !seen.insert(id.clone()) {
                return Err(ConfigError::Invalid(format!("duplicate id {:?}", id)));
            }
            if width <= 0 || height <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "{:?} has non-positive size {}x{}",
                    id, width, height
                )));
            }
        }

        if self.sprites.idle.is_empty() {
            return Err(ConfigError::Invalid("idle sprite tag is empty".to_string()));
        }

        Ok(())
    }

    /// Banner lines with their draw positions.
    pub fn banner_lines(&self) -> impl Iterator<Item = (Position, &str)> + '_ {
        self.banner.iter().enumerate().map(|(i, line)| {
            let at = BANNER_ORIGIN.offset(0, BANNER_LINE_HEIGHT * i as i32);
            (at, line.as_str())
        })
    }
}
