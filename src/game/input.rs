//! Input Intents
//!
//! The upstream input layer reduces key events to per-frame intents. The core
//! never sees key codes, only one boolean per logical action.
//!
//! [`InputState`] turns press/release notifications for logical actions into
//! intents, debouncing each action with its own cooldown.
//! [`IntentRecording`] stores intents per frame for replay.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::cooldown::{Cooldown, Millis};
use crate::core::vec2::Direction;

/// Default debounce window for repeated presses of the same action.
pub const KEY_DEBOUNCE_MS: Millis = 250;

// =============================================================================
// INTENT TYPES
// =============================================================================

/// Logical actions the input layer reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    /// Walk up
    MoveUp = 0,
    /// Walk down
    MoveDown = 1,
    /// Walk left
    MoveLeft = 2,
    /// Walk right
    MoveRight = 3,
    /// Interact with whatever the player faces
    Interact = 4,
    /// Leave the game (handled outside the core)
    Quit = 5,
}

impl Action {
    /// Number of actions.
    pub const COUNT: usize = 6;

    /// All actions in index order.
    pub const ALL: [Action; Self::COUNT] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Interact,
        Action::Quit,
    ];

    /// Index into per-action tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Intents for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputIntent {
    /// Walk up
    pub move_up: bool,
    /// Walk down
    pub move_down: bool,
    /// Walk left
    pub move_left: bool,
    /// Walk right
    pub move_right: bool,
    /// Interact this frame
    pub interact: bool,
}

impl InputIntent {
    /// No intent at all.
    pub const IDLE: Self = Self {
        move_up: false,
        move_down: false,
        move_left: false,
        move_right: false,
        interact: false,
    };

    /// Intent to walk one way.
    pub fn walking(direction: Direction) -> Self {
        let mut intent = Self::IDLE;
        match direction {
            Direction::Up => intent.move_up = true,
            Direction::Down => intent.move_down = true,
            Direction::Left => intent.move_left = true,
            Direction::Right => intent.move_right = true,
        }
        intent
    }

    /// Intent to interact without moving.
    pub fn interacting() -> Self {
        Self { interact: true, ..Self::IDLE }
    }

    /// Resolve to a displacement and facing.
    ///
    /// Up then down set dy (down wins), left then right set dx (right wins).
    /// The facing is the last direction applied; `None` without movement.
    pub fn resolve(&self, speed: u32) -> (i32, i32, Option<Direction>) {
        let step = speed as i32;
        let (mut dx, mut dy, mut facing) = (0, 0, None);

        if self.move_up {
            dy = -step;
            facing = Some(Direction::Up);
        }
        if self.move_down {
            dy = step;
            facing = Some(Direction::Down);
        }
        if self.move_left {
            dx = -step;
            facing = Some(Direction::Left);
        }
        if self.move_right {
            dx = step;
            facing = Some(Direction::Right);
        }

        (dx, dy, facing)
    }
}

// =============================================================================
// INPUT STATE
// =============================================================================

/// Builds intents from logical press/release notifications.
///
/// Movement actions latch while held. `Interact` arms a one-shot trigger
/// consumed by [`take_intent`](Self::take_intent). Each action owns a
/// debounce cooldown; a repeat press inside the window is ignored unless
/// the action was released in between.
#[derive(Clone, Debug)]
pub struct InputState {
    debounce_ms: Millis,
    held: [bool; Action::COUNT],
    debounce: [Option<Cooldown>; Action::COUNT],
    interact_armed: bool,
    quit_requested: bool,
}

impl InputState {
    /// Create with every action released and immediately pressable.
    pub fn new(debounce_ms: Millis) -> Self {
        Self {
            debounce_ms,
            held: [false; Action::COUNT],
            debounce: [None; Action::COUNT],
            interact_armed: false,
            quit_requested: false,
        }
    }

    /// Report a press. Returns false if it was debounced away.
    pub fn press(&mut self, action: Action, now: Millis) -> bool {
        let slot = &mut self.debounce[action.index()];
        if slot.is_some_and(|cd| !cd.elapsed(now)) {
            debug!("{:?} debounced", action);
            return false;
        }
        *slot = Some(Cooldown::new(self.debounce_ms, now));

        match action {
            Action::Interact => self.interact_armed = true,
            Action::Quit => self.quit_requested = true,
            _ => {}
        }
        self.held[action.index()] = true;
        true
    }

    /// Report a release. Never debounced; re-opens the action's window.
    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
        self.debounce[action.index()] = None;
    }

    /// Release everything (the "no key" event).
    pub fn release_all(&mut self) {
        for action in Action::ALL {
            self.release(action);
        }
        self.interact_armed = false;
    }

    /// Is the action currently held?
    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Has a quit been requested? The core never exits on its own.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Intent for this frame. Consumes the interact trigger.
    pub fn take_intent(&mut self) -> InputIntent {
        let intent = InputIntent {
            move_up: self.is_held(Action::MoveUp),
            move_down: self.is_held(Action::MoveDown),
            move_left: self.is_held(Action::MoveLeft),
            move_right: self.is_held(Action::MoveRight),
            interact: self.interact_armed,
        };
        self.interact_armed = false;
        intent
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(KEY_DEBOUNCE_MS)
    }
}

// =============================================================================
// RECORDING
// =============================================================================

/// Intent change at a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentDelta {
    /// Frame where this intent began
    pub frame: u64,
    /// The new intent
    pub intent: InputIntent,
}

/// Delta-compressed per-frame intent log.
///
/// Only frames where the intent changed are stored, plus the last frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecording {
    end_frame: Option<u64>,
    deltas: Vec<IntentDelta>,
}

impl IntentRecording {
    /// Empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the intent used at `frame`.
    pub fn record(&mut self, frame: u64, intent: InputIntent) {
        self.end_frame = Some(frame);
        if intent != self.last_intent() {
            self.deltas.push(IntentDelta { frame, intent });
        }
    }

    /// Intent of the most recent change (idle if none).
    fn last_intent(&self) -> InputIntent {
        self.deltas.last().map_or(InputIntent::IDLE, |d| d.intent)
    }

    /// Last recorded frame.
    pub fn end_frame(&self) -> Option<u64> {
        self.end_frame
    }

    /// Intent in effect at `frame` (idle before the first change).
    pub fn intent_at(&self, frame: u64) -> InputIntent {
        let idx = self.deltas.partition_point(|d| d.frame <= frame);
        if idx == 0 {
            InputIntent::IDLE
        } else {
            self.deltas[idx - 1].intent
        }
    }

    /// Stored changes.
    pub fn deltas(&self) -> &[IntentDelta] {
        &self.deltas
    }

    /// Number of frames covered (0 when nothing was recorded).
    pub fn frame_count(&self) -> u64 {
        self.end_frame.map_or(0, |frame| frame + 1)
    }

    /// Every frame from 0 through `end_frame` with its intent.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            frame: 0,
            delta_idx: 0,
            current: InputIntent::IDLE,
        }
    }
}

/// Iterator for replaying a recording frame by frame.
pub struct ReplayIterator<'a> {
    recording: &'a IntentRecording,
    frame: u64,
    delta_idx: usize,
    current: InputIntent,
}

impl<'a> Iterator for ReplayIterator<'a> {
    type Item = (u64, InputIntent);

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.recording.frame_count() {
            return None;
        }

        while let Some(delta) = self.recording.deltas.get(self.delta_idx) {
            if delta.frame > self.frame {
                break;
            }
            self.current = delta.intent;
            self.delta_idx += 1;
        }

        let item = (self.frame, self.current);
        self.frame += 1;
        Some(item)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_single_direction() {
        assert_eq!(
            InputIntent::walking(Direction::Right).resolve(5),
            (5, 0, Some(Direction::Right))
        );
        assert_eq!(
            InputIntent::walking(Direction::Up).resolve(5),
            (0, -5, Some(Direction::Up))
        );
        assert_eq!(InputIntent::IDLE.resolve(5), (0, 0, None));
        assert_eq!(InputIntent::interacting().resolve(5), (0, 0, None));
    }

    #[test]
    fn test_resolve_conflicts() {
        let all = InputIntent {
            move_up: true,
            move_down: true,
            move_left: true,
            move_right: true,
            interact: false,
        };
        // Down beats up, right beats left, horizontal sets facing last
        assert_eq!(all.resolve(3), (3, 3, Some(Direction::Right)));

        let diagonal = InputIntent { move_up: true, move_left: true, ..InputIntent::IDLE };
        assert_eq!(diagonal.resolve(5), (-5, -5, Some(Direction::Left)));
    }

    #[test]
    fn test_held_movement_latches() {
        let mut input = InputState::default();
        assert!(input.press(Action::MoveLeft, 0));

        for _ in 0..3 {
            assert!(input.take_intent().move_left);
        }

        input.release(Action::MoveLeft);
        assert!(!input.take_intent().move_left);
    }

    #[test]
    fn test_interact_trigger_is_one_shot() {
        let mut input = InputState::default();
        input.press(Action::Interact, 0);

        assert!(input.take_intent().interact);
        assert!(!input.take_intent().interact);
    }

    #[test]
    fn test_debounce_is_per_action() {
        let mut input = InputState::new(250);

        assert!(input.press(Action::Interact, 0));
        input.take_intent();

        // Same action inside the window is ignored
        assert!(!input.press(Action::Interact, 100));
        assert!(!input.take_intent().interact);

        // A different action is unaffected
        assert!(input.press(Action::MoveUp, 100));

        // Window over
        assert!(input.press(Action::Interact, 250));
        assert!(input.take_intent().interact);
    }

    #[test]
    fn test_repress_after_release_accepted() {
        let mut input = InputState::new(250);

        assert!(input.press(Action::MoveUp, 0));
        input.release(Action::MoveUp);

        // Fresh tap inside the window is not auto-repeat
        assert!(input.press(Action::MoveUp, 100));
        assert!(input.is_held(Action::MoveUp));
        assert!(input.take_intent().move_up);

        // Holding and re-pressing is still debounced
        assert!(!input.press(Action::MoveUp, 200));
    }

    #[test]
    fn test_release_all_reopens_every_window() {
        let mut input = InputState::new(250);
        for action in Action::ALL {
            assert!(input.press(action, 0));
        }

        input.release_all();
        for action in Action::ALL {
            assert!(!input.is_held(action));
            assert!(input.press(action, 10));
        }
    }

    #[test]
    fn test_release_all_and_quit() {
        let mut input = InputState::default();
        input.press(Action::MoveUp, 0);
        input.press(Action::MoveRight, 0);
        input.press(Action::Interact, 0);
        input.press(Action::Quit, 0);

        input.release_all();
        assert_eq!(input.take_intent(), InputIntent::IDLE);
        assert!(input.quit_requested());
    }

    #[test]
    fn test_recording_delta_compression() {
        let mut rec = IntentRecording::new();
        let walk = InputIntent::walking(Direction::Right);

        for frame in 0..4 {
            rec.record(frame, walk);
        }
        assert_eq!(rec.deltas().len(), 1);

        rec.record(4, InputIntent::IDLE);
        assert_eq!(rec.deltas().len(), 2);
        assert_eq!(rec.frame_count(), 5);
    }

    #[test]
    fn test_recording_idle_prefix_not_stored() {
        let mut rec = IntentRecording::new();
        rec.record(0, InputIntent::IDLE);
        rec.record(1, InputIntent::IDLE);

        assert!(rec.deltas().is_empty());
        assert_eq!(rec.frame_count(), 2);
        assert_eq!(rec.replay_iter().count(), 2);
    }

    #[test]
    fn test_intent_at() {
        let mut rec = IntentRecording::new();
        let up = InputIntent::walking(Direction::Up);
        let down = InputIntent::walking(Direction::Down);

        rec.record(10, up);
        rec.record(20, down);

        assert_eq!(rec.intent_at(5), InputIntent::IDLE);
        assert_eq!(rec.intent_at(10), up);
        assert_eq!(rec.intent_at(15), up);
        assert_eq!(rec.intent_at(20), down);
        assert_eq!(rec.intent_at(99), down);
    }

    #[test]
    fn test_replay_iterator() {
        let mut rec = IntentRecording::new();
        let left = InputIntent::walking(Direction::Left);
        let talk = InputIntent::interacting();

        rec.record(0, left);
        rec.record(1, left);
        rec.record(2, left);
        rec.record(3, talk);
        rec.record(4, talk);

        let frames: Vec<_> = rec.replay_iter().collect();
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0], (0, left));
        assert_eq!(frames[2], (2, left));
        assert_eq!(frames[3], (3, talk));
        assert_eq!(frames[4], (4, talk));
    }

    #[test]
    fn test_empty_recording_replays_nothing() {
        let rec = IntentRecording::new();
        assert_eq!(rec.frame_count(), 0);
        assert_eq!(rec.end_frame(), None);
        assert_eq!(rec.replay_iter().count(), 0);
    }

    #[test]
    fn test_idle_recording_survives_serde() {
        let mut rec = IntentRecording::new();
        for frame in 0..5 {
            rec.record(frame, InputIntent::IDLE);
        }

        let json = serde_json::to_string(&rec).unwrap();
        let back: IntentRecording = serde_json::from_str(&json).unwrap();

        assert_eq!(back, rec);
        assert_eq!(back.frame_count(), 5);
        assert_eq!(back.replay_iter().count(), 5);
    }

    #[test]
    fn test_deserialized_recording_keeps_compressing() {
        let walk = InputIntent::walking(Direction::Left);
        let mut rec = IntentRecording::new();
        rec.record(0, walk);
        rec.record(1, walk);

        let json = serde_json::to_string(&rec).unwrap();
        let mut back: IntentRecording = serde_json::from_str(&json).unwrap();

        // Same intent after reload is not a new change
        back.record(2, walk);
        assert_eq!(back.deltas().len(), 1);
        assert_eq!(back.frame_count(), 3);
    }
}
