//! Frame Step
//!
//! One call per frame: draw the backdrop, move the player with
//! reject-and-revert collision, animate, then run every object's
//! interaction and display logic in registration order.
//!
//! Time is passed in, never read, so a recorded intent sequence replayed
//! at the same timestamps reproduces the same world and the same draw calls.

use tracing::{debug, info, warn};

use crate::config::{GameConfig, WorldLayout};
use crate::core::cooldown::Millis;
use crate::game::events::FrameEvent;
use crate::game::input::{InputIntent, IntentRecording};
use crate::game::player::MoveAttempt;
use crate::game::state::WorldState;
use crate::render::{Color, NullSink, RenderSink};

/// Result of a frame step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickResult {
    /// Frame number that was stepped
    pub frame: u64,
    /// What the movement controller did
    pub attempt: MoveAttempt,
    /// A committed move was rolled back
    pub reverted: bool,
    /// Events generated this frame
    pub events: Vec<FrameEvent>,
}

/// Timestamp of `frame` in a run started at `start_ms` with a fixed period.
#[inline]
pub fn frame_time(start_ms: Millis, frame: u64, frame_ms: Millis) -> Millis {
    start_ms + frame * frame_ms
}

/// Run one frame.
///
/// # Order
///
/// 1. Background and banner
/// 2. Resolve intent, snapshot, attempt the move
/// 3. Sync the player's box; on any overlap restore the snapshot and re-sync
/// 4. Advance or idle the animation
/// 5. Draw the player, falling back to the idle sprite
/// 6. Per object: interaction, display timeout, draw
pub fn tick(
    world: &mut WorldState,
    intent: &InputIntent,
    now: Millis,
    sink: &mut dyn RenderSink,
) -> TickResult {
    let frame = world.frame;
    let mut events = Vec::new();

    // 1. Backdrop
    if let Err(e) = sink.draw_sprite(0, 0, &world.background) {
        warn!("background: {}", e);
    }
    for (at, line) in &world.banner {
        sink.draw_text(at.x, at.y, line, Color::White);
    }

    // 2. Movement
    let (dx, dy, facing) = intent.resolve(world.player.speed());
    if let Some(facing) = facing {
        world.player.facing = facing;
    }

    let snapshot = world.player.position;
    let attempt = world.player.attempt_move(dx, dy, now);
    let mut reverted = false;

    // 3. Validate against the registry
    if attempt.committed() {
        world.player.sync_bbox(&mut world.registry);
        let blockers = world.registry.all_collisions(world.player.bbox());

        if blockers.is_empty() {
            events.push(FrameEvent::moved(frame, world.player.position));
        } else {
            let attempted = world.player.position;
            let ids = world.registry.ids_of(&blockers);
            debug!("frame {}: move to {} blocked by {:?}", frame, attempted, ids);

            world.player.position = snapshot;
            world.player.sync_bbox(&mut world.registry);
            reverted = true;
            events.push(FrameEvent::move_blocked(frame, attempted, ids));
        }
    }

    // 4. Animation
    world
        .player
        .update_animation(attempt.reports_moved(), &world.sprites, now);

    // 5. Player sprite
    let at = world.player.position;
    if let Err(e) = sink.draw_sprite(at.x, at.y, world.player.sprite_tag()) {
        warn!("player: {}, drawing {}", e, world.sprites.idle);
        if let Err(e) = sink.draw_sprite(at.x, at.y, &world.sprites.idle) {
            warn!("player idle sprite: {}", e);
        }
    }

    // 6. Objects, registration order
    for object in world.objects.iter_mut() {
        let was_active = object.is_active();

        if object.handle_interaction(&world.player, intent.interact, &mut world.registry, now) {
            info!("frame {}: {} says {:?}", frame, object.id(), object.text());
            events.push(FrameEvent::interacted(frame, object.id(), object.text()));
            if was_active && !object.is_active() {
                events.push(FrameEvent::object_consumed(frame, object.id()));
            }
        }

        let was_showing = object.is_showing_text();
        if was_showing && !object.update(now) {
            events.push(FrameEvent::text_hidden(frame, object.id()));
        }

        object.draw(&world.registry, sink);
    }

    world.frame += 1;

    TickResult {
        frame,
        attempt,
        reverted,
        events,
    }
}

/// Rebuild the world from `layout` and re-run a recording headlessly.
///
/// Frame `f` runs at `start_ms + f * config.frame_ms`.
pub fn replay(
    layout: &WorldLayout,
    config: &GameConfig,
    recording: &IntentRecording,
    start_ms: Millis,
) -> (WorldState, Vec<FrameEvent>) {
    let mut world = WorldState::from_layout(layout, config, start_ms);
    let mut all_events = Vec::new();
    let mut sink = NullSink;

    for (frame, intent) in recording.replay_iter() {
        let now = frame_time(start_ms, frame, config.frame_ms);
        let result = tick(&mut world, &intent, now, &mut sink);
        all_events.extend(result.events);
    }

    (world, all_events)
}
