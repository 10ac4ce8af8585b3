//! Cell Escape
//!
//! Headless driver: builds the world, plays a scripted escape attempt
//! through the input layer, then replays the recorded intents and checks
//! that both runs end in the same state.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cell_escape::{
    VERSION,
    config::{GameConfig, WorldLayout},
    core::cooldown::{Clock, ManualClock},
    game::{
        events::FrameEventData,
        input::{Action, InputState, IntentRecording},
        state::WorldState,
        tick::{tick, replay},
    },
    render::FrameBuffer,
};

/// Clock origin for the scripted run.
const START_MS: u64 = 0;

/// Scripted key events: (frame, pressed, action).
const SCRIPT: &[(u64, bool, Action)] = &[
    (0, true, Action::MoveUp),
    (40, false, Action::MoveUp),
    (40, true, Action::MoveLeft),
    (150, false, Action::MoveLeft),
    (155, true, Action::Interact),
    (160, true, Action::MoveLeft),
    (200, false, Action::MoveLeft),
    (420, true, Action::Quit),
];

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Cell Escape v{}", VERSION);

    let config = GameConfig::from_env().context("Invalid CELL_* override")?;
    let layout = match std::env::args().nth(1) {
        Some(path) => WorldLayout::load(&path)
            .with_context(|| format!("Failed to load layout from {}", path))?,
        None => WorldLayout::default(),
    };

    let (world, recording) = scripted_run(&layout, &config);
    verify_replay(&layout, &config, &world, &recording);

    Ok(())
}

/// Play the script against a manual clock and record every intent.
fn scripted_run(layout: &WorldLayout, config: &GameConfig) -> (WorldState, IntentRecording) {
    info!("=== Scripted Run ===");

    let clock = ManualClock::new(START_MS);
    let mut world = WorldState::from_layout(layout, config, clock.now_ms());
    let mut input = InputState::new(config.key_debounce_ms);
    let mut recording = IntentRecording::new();
    let mut frame_buffer = FrameBuffer::new();
    let mut draw_calls = 0usize;
    let mut blocked = 0usize;

    loop {
        let now = clock.now_ms();
        for &(_, pressed, action) in SCRIPT.iter().filter(|(f, _, _)| *f == world.frame) {
            if pressed {
                input.press(action, now);
            } else {
                input.release(action);
            }
        }
        if input.quit_requested() {
            info!("Quit requested at frame {}", world.frame);
            break;
        }

        let intent = input.take_intent();
        recording.record(world.frame, intent);

        let result = tick(&mut world, &intent, now, &mut frame_buffer);
        draw_calls += frame_buffer.take_commands().len();

        for event in &result.events {
            match &event.data {
                FrameEventData::MoveBlocked { .. } => blocked += 1,
                FrameEventData::Interacted { object_id, text } => {
                    info!("Frame {}: {} -> {:?}", event.frame, object_id, text);
                }
                FrameEventData::ObjectConsumed { object_id } => {
                    info!("Frame {}: {} is gone", event.frame, object_id);
                }
                FrameEventData::TextHidden { object_id } => {
                    info!("Frame {}: {} text hidden", event.frame, object_id);
                }
                FrameEventData::Moved { .. } => {}
            }
        }

        clock.advance(config.frame_ms);
    }

    info!(
        "Ran {} frames: player at {}, {} blocked moves, {} draw calls, {} intent changes",
        world.frame,
        world.player.position,
        blocked,
        draw_calls,
        recording.deltas().len()
    );

    (world, recording)
}

/// Re-run the recording headlessly and compare state hashes.
fn verify_replay(
    layout: &WorldLayout,
    config: &GameConfig,
    world: &WorldState,
    recording: &IntentRecording,
) {
    info!("=== Verifying Replay ===");

    let hash = world.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    let (replayed, events) = replay(layout, config, recording, START_MS);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {} ({} events)", hex::encode(replay_hash), events.len());

    if hash == replay_hash {
        info!("REPLAY VERIFIED: Hashes match!");
    } else {
        warn!("REPLAY MISMATCH: Hashes differ!");
    }
}
