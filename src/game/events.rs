//! Frame Events
//!
//! Events generated during a frame step for logging, replay and verification.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Position;

/// Frame event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameEventData {
    /// Player committed a displacement
    Moved {
        /// New position
        to: Position,
    },

    /// Displacement rolled back because of overlapping boxes
    MoveBlocked {
        /// Position that was rejected
        attempted: Position,
        /// Ids of the overlapping boxes, registration order
        blockers: Vec<String>,
    },

    /// Player interacted with an object
    Interacted {
        /// Object id
        object_id: String,
        /// Text now on screen
        text: String,
    },

    /// Object vanished for good
    ObjectConsumed {
        /// Object id
        object_id: String,
    },

    /// Interaction text timed out
    TextHidden {
        /// Object id
        object_id: String,
    },
}

/// An event stamped with its frame number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Frame when the event occurred
    pub frame: u64,

    /// Event data
    pub data: FrameEventData,
}

impl FrameEvent {
    /// Create a new event.
    pub fn new(frame: u64, data: FrameEventData) -> Self {
        Self { frame, data }
    }

    /// Create moved event.
    pub fn moved(frame: u64, to: Position) -> Self {
        Self::new(frame, FrameEventData::Moved { to })
    }

    /// Create move blocked event.
    pub fn move_blocked(frame: u64, attempted: Position, blockers: Vec<String>) -> Self {
        Self::new(frame, FrameEventData::MoveBlocked { attempted, blockers })
    }

    /// Create interacted event.
    pub fn interacted(frame: u64, object_id: &str, text: &str) -> Self {
        Self::new(
            frame,
            FrameEventData::Interacted {
                object_id: object_id.to_string(),
                text: text.to_string(),
            },
        )
    }

    /// Create object consumed event.
    pub fn object_consumed(frame: u64, object_id: &str) -> Self {
        Self::new(
            frame,
            FrameEventData::ObjectConsumed {
                object_id: object_id.to_string(),
            },
        )
    }

    /// Create text hidden event.
    pub fn text_hidden(frame: u64, object_id: &str) -> Self {
        Self::new(
            frame,
            FrameEventData::TextHidden {
                object_id: object_id.to_string(),
            },
        )
    }

    /// Object this event concerns, if any.
    pub fn object_id(&self) -> Option<&str> {
        match &self.data {
            FrameEventData::Interacted { object_id, .. }
            | FrameEventData::ObjectConsumed { object_id }
            | FrameEventData::TextHidden { object_id } => Some(object_id),
            FrameEventData::Moved { .. } | FrameEventData::MoveBlocked { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id() {
        assert_eq!(FrameEvent::interacted(3, "key", "hi").object_id(), Some("key"));
        assert_eq!(FrameEvent::object_consumed(3, "key").object_id(), Some("key"));
        assert_eq!(FrameEvent::text_hidden(3, "door").object_id(), Some("door"));
        assert_eq!(FrameEvent::moved(3, Position::ZERO).object_id(), None);
    }

    #[test]
    fn test_event_serializes() {
        let event = FrameEvent::move_blocked(7, Position::new(645, 360), vec!["wall".to_string()]);
        let json = serde_json::to_string(&event).unwrap();
        let back: FrameEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(back, event);
        assert!(json.contains("MoveBlocked"));
    }
}
