//! Ping-Pong Sprite Animation
//!
//! Direction-indexed walk cycles that bounce between their first and last
//! frame instead of wrapping, plus a single idle sprite.

use serde::{Serialize, Deserialize};

use crate::core::cooldown::{Cooldown, Millis};
use crate::core::vec2::Direction;

/// Default frame pacing.
pub const ANIMATION_FRAME_MS: Millis = 75;

/// Sprite tags for each facing direction plus the idle pose.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSet {
    /// Walk cycle facing down
    pub down: Vec<String>,
    /// Walk cycle facing left
    pub left: Vec<String>,
    /// Walk cycle facing right
    pub right: Vec<String>,
    /// Walk cycle facing up
    pub up: Vec<String>,
    /// Standing pose, also the render fallback
    pub idle: String,
}

impl SpriteSet {
    /// Walk cycle for a facing direction.
    pub fn frames(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::Up => &self.up,
        }
    }
}

impl Default for SpriteSet {
    fn default() -> Self {
        let cycle = |suffix: &str| -> Vec<String> {
            (1..=4).map(|i| format!("{}{}", i, suffix)).collect()
        };
        Self {
            down: cycle("F"),
            left: cycle("L"),
            right: cycle("R"),
            up: cycle("B"),
            idle: "f1".to_string(),
        }
    }
}

/// Ping-pong animation state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animator {
    frame: usize,
    step: i8,
    cooldown: Cooldown,
    tag: String,
}

impl Animator {
    /// Start at frame 0 stepping forward, showing the idle sprite.
    pub fn new(sprites: &SpriteSet, frame_ms: Millis, now: Millis) -> Self {
        Self {
            frame: 0,
            step: 1,
            cooldown: Cooldown::new(frame_ms, now),
            tag: sprites.idle.clone(),
        }
    }

    /// Current frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Current ping-pong direction (+1 or -1).
    pub fn step(&self) -> i8 {
        self.step
    }

    /// Tag to draw this frame.
    pub fn current_tag(&self) -> &str {
        &self.tag
    }

    /// Per-frame update.
    ///
    /// Not moving: show idle, keep frame index and step so the cycle resumes
    /// where it left off. Moving: advance one frame when the pacing
    /// cooldown has elapsed, otherwise keep the current tag.
    pub fn update(&mut self, moving: bool, facing: Direction, sprites: &SpriteSet, now: Millis) {
        if !moving {
            if self.tag != sprites.idle {
                self.tag.clone_from(&sprites.idle);
            }
            return;
        }

        if !self.cooldown.try_fire(now) {
            return;
        }

        let frames = sprites.frames(facing);
        if frames.is_empty() {
            self.tag.clone_from(&sprites.idle);
            return;
        }

        self.advance(frames.len());
        self.tag.clone_from(&frames[self.frame]);
    }

    /// Bounce the frame index inside `0..len`.
    fn advance(&mut self, len: usize) {
        let last = len as i64 - 1;
        let next = self.frame as i64 + self.step as i64;

        if next >= last {
            self.frame = last as usize;
            self.step = -1;
        } else if next <= 0 {
            self.frame = 0;
            self.step = 1;
        } else {
            self.frame = next as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> (Animator, SpriteSet) {
        let sprites = SpriteSet::default();
        (Animator::new(&sprites, ANIMATION_FRAME_MS, 0), sprites)
    }

    #[test]
    fn test_default_sprite_set() {
        let sprites = SpriteSet::default();
        assert_eq!(sprites.frames(Direction::Down).to_vec(), vec!["1F", "2F", "3F", "4F"]);
        assert_eq!(sprites.frames(Direction::Left)[0], "1L");
        assert_eq!(sprites.frames(Direction::Right)[3], "4R");
        assert_eq!(sprites.frames(Direction::Up)[1], "2B");
        assert_eq!(sprites.idle, "f1");
    }

    #[test]
    fn test_bounce_at_last_frame() {
        let (mut anim, sprites) = animator();
        let mut now = 0;
        let mut seen = Vec::new();

        for _ in 0..4 {
            now += ANIMATION_FRAME_MS;
            anim.update(true, Direction::Down, &sprites, now);
            seen.push(anim.frame());
            if anim.frame() == 3 {
                assert_eq!(anim.step(), -1);
            }
        }

        // Index 4 is never reached
        assert_eq!(seen, vec![1, 2, 3, 2]);
        assert_eq!(anim.current_tag(), "3F");
    }

    #[test]
    fn test_full_cycle_never_wraps() {
        let (mut anim, sprites) = animator();
        let frames: Vec<usize> = (1..=8)
            .map(|i| {
                anim.update(true, Direction::Right, &sprites, i * ANIMATION_FRAME_MS);
                anim.frame()
            })
            .collect();

        assert_eq!(frames, vec![1, 2, 3, 2, 1, 0, 1, 2]);
    }

    #[test]
    fn test_paced_by_cooldown() {
        let (mut anim, sprites) = animator();

        anim.update(true, Direction::Down, &sprites, 10);
        assert_eq!(anim.frame(), 0);
        // Tag stays idle until the first frame fires
        assert_eq!(anim.current_tag(), "f1");

        anim.update(true, Direction::Down, &sprites, 75);
        assert_eq!(anim.frame(), 1);
        anim.update(true, Direction::Down, &sprites, 100);
        assert_eq!(anim.frame(), 1);
        anim.update(true, Direction::Down, &sprites, 150);
        assert_eq!(anim.frame(), 2);
    }

    #[test]
    fn test_idle_preserves_cycle_position() {
        let (mut anim, sprites) = animator();
        anim.update(true, Direction::Left, &sprites, 75);
        anim.update(true, Direction::Left, &sprites, 150);
        assert_eq!(anim.frame(), 2);
        assert_eq!(anim.current_tag(), "3L");

        anim.update(false, Direction::Left, &sprites, 225);
        assert_eq!(anim.current_tag(), "f1");
        assert_eq!(anim.frame(), 2);
        assert_eq!(anim.step(), 1);

        // Resume continues from frame 2
        anim.update(true, Direction::Left, &sprites, 300);
        assert_eq!(anim.frame(), 3);
        assert_eq!(anim.current_tag(), "4L");
    }

    #[test]
    fn test_facing_selects_row() {
        let (mut anim, sprites) = animator();
        anim.update(true, Direction::Up, &sprites, 75);
        assert_eq!(anim.current_tag(), "2B");
        anim.update(true, Direction::Right, &sprites, 150);
        assert_eq!(anim.current_tag(), "3R");
    }

    #[test]
    fn test_degenerate_sprite_lists() {
        let sprites = SpriteSet {
            down: vec!["only".to_string()],
            left: Vec::new(),
            right: Vec::new(),
            up: Vec::new(),
            idle: "idle".to_string(),
        };
        let mut anim = Animator::new(&sprites, 10, 0);

        for i in 1..=3 {
            anim.update(true, Direction::Down, &sprites, i * 10);
            assert_eq!(anim.frame(), 0);
            assert_eq!(anim.current_tag(), "only");
        }

        anim.update(true, Direction::Left, &sprites, 40);
        assert_eq!(anim.current_tag(), "idle");
    }
}
