//! Game loop thread: runs the simulation at ~60Hz and publishes snapshots.
//!
//! The engine is built on the caller's thread so configuration errors surface
//! before anything is spawned, then moved into the loop thread. Commands
//! arrive via `mpsc` channel. Snapshots are stored in shared state for
//! polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info};

use ecosim_core::config::SimConfig;
use ecosim_core::constants::NOMINAL_FRAME_MS;
use ecosim_core::state::SimSnapshot;
use ecosim_sim::Simulation;

use crate::state::GameLoopCommand;

/// Nominal frame duration (one tick at time factor 1).
const FRAME_DURATION: Duration = Duration::from_millis(NOMINAL_FRAME_MS as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread's join handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let engine = Simulation::new(config).context("invalid simulation config")?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("ecosim-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: Simulation,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
) {
    info!(seed = engine.config().seed, "game loop started");
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Sim(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick by the measured wall time
        let now = Instant::now();
        let elapsed_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = now;
        let snapshot = engine.tick(elapsed_ms);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; the time factor cap absorbs the stall
            debug!(behind_ms = (now - next_frame_time).as_millis() as u64, "frame schedule reset");
            next_frame_time = now;
        }
    }
}
