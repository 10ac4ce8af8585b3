//! Render Sink
//!
//! The host renderer is an external collaborator. The core only enqueues
//! draw calls through [`RenderSink`]; nothing here rasterizes anything.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Text colors used by the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// Banner text
    White,
    /// Interaction text
    Yellow,
}

/// Errors a sink may report for a draw call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Sprite tag does not resolve to a drawable sprite.
    #[error("Unknown sprite tag: {0}")]
    UnknownSprite(String),
}

/// Fire-and-forget draw queue for one frame.
pub trait RenderSink {
    /// Enqueue a text draw.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color);

    /// Enqueue a sprite draw. May reject tags it cannot resolve.
    fn draw_sprite(&mut self, x: i32, y: i32, tag: &str) -> Result<(), RenderError>;
}

/// A recorded draw call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Text at a position
    Text {
        /// Left edge
        x: i32,
        /// Baseline
        y: i32,
        /// Text to draw
        text: String,
        /// Text color
        color: Color,
    },
    /// Sprite at a position
    Sprite {
        /// Left edge
        x: i32,
        /// Top edge
        y: i32,
        /// Sprite tag
        tag: String,
    },
}

/// Sink that records draw calls in order.
///
/// With a sprite catalog set, unknown tags are rejected like a real
/// renderer would; without one every tag is accepted.
#[derive(Clone, Debug, Default)]
pub struct FrameBuffer {
    commands: Vec<DrawCommand>,
    catalog: Option<BTreeSet<String>>,
}

impl FrameBuffer {
    /// Accept every sprite tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only the listed sprite tags.
    pub fn with_catalog<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: Vec::new(),
            catalog: Some(tags.into_iter().map(Into::into).collect()),
        }
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands (end of frame).
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Sprite tags drawn so far, in order.
    pub fn sprite_tags(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Sprite { tag, .. } => Some(tag.as_str()),
                DrawCommand::Text { .. } => None,
            })
            .collect()
    }

    /// Texts drawn so far, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::Sprite { .. } => None,
            })
            .collect()
    }
}

impl RenderSink for FrameBuffer {
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }

    fn draw_sprite(&mut self, x: i32, y: i32, tag: &str) -> Result<(), RenderError> {
        if let Some(catalog) = &self.catalog {
            if !catalog.contains(tag) {
                return Err(RenderError::UnknownSprite(tag.to_string()));
            }
        }
        self.commands.push(DrawCommand::Sprite {
            x,
            y,
            tag: tag.to_string(),
        });
        Ok(())
    }
}

/// Sink that drops everything. Used for headless replay.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw_text(&mut self, _x: i32, _y: i32, _text: &str, _color: Color) {}

    fn draw_sprite(&mut self, _x: i32, _y: i32, _tag: &str) -> Result<(), RenderError> {
        Ok(())
    }
}
