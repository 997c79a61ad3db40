//! Control surface over the game loop: start, command, poll, stop.
//!
//! A presentation layer calls these instead of touching the engine; every
//! mutation travels through the loop's command channel.

use anyhow::{anyhow, bail};
use tracing::info;

use ecosim_core::commands::SimCommand;
use ecosim_core::config::SimConfig;
use ecosim_core::state::SimSnapshot;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &AppState, config: SimConfig) -> anyhow::Result<()> {
    let mut running = state.running.lock().map_err(|e| anyhow!(e.to_string()))?;

    if *running {
        bail!("simulation already running");
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())?;

    *state.command_tx.lock().map_err(|e| anyhow!(e.to_string()))? = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|e| anyhow!(e.to_string()))? = Some(handle);
    *running = true;

    Ok(())
}

/// Send a command to the simulation. It applies at the next tick.
pub fn send_command(state: &AppState, command: SimCommand) -> anyhow::Result<()> {
    let tx_lock = state.command_tx.lock().map_err(|e| anyhow!(e.to_string()))?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::Sim(command))
            .map_err(|e| anyhow!("failed to send command: {e}")),
        None => bail!("simulation not started"),
    }
}

/// Get the latest snapshot (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> anyhow::Result<Option<SimSnapshot>> {
    let lock = state.latest_snapshot.lock().map_err(|e| anyhow!(e.to_string()))?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to exit. No-op when not running.
pub fn stop_simulation(state: &AppState) -> anyhow::Result<()> {
    let mut running = state.running.lock().map_err(|e| anyhow!(e.to_string()))?;
    if !*running {
        return Ok(());
    }

    if let Some(tx) = state.command_tx.lock().map_err(|e| anyhow!(e.to_string()))?.take() {
        // A send error means the loop already exited.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    let handle = state.loop_handle.lock().map_err(|e| anyhow!(e.to_string()))?.take();
    if let Some(handle) = handle {
        handle
            .join()
            .map_err(|_| anyhow!("game loop thread panicked"))?;
    }

    *running = false;
    info!("simulation stopped");
    Ok(())
}
