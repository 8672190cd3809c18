//! Control surface: start the driver, send commands, poll snapshots.
//!
//! These functions bridge a front end to the driver thread via channels. A
//! rendering layer calls them; the binary uses them for headless runs.

use thiserror::Error;

use tactrainer_core::commands::OperatorCommand;
use tactrainer_core::state::WorldSnapshot;
use tactrainer_sim::engine::SimulationEngine;

use crate::game_loop;
use crate::state::{AppState, DriverCommand};

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("Simulation already running")]
    AlreadyRunning,

    #[error("Simulation not started")]
    NotStarted,

    #[error("Driver channel closed")]
    ChannelClosed,

    #[error("Shared state lock poisoned")]
    LockPoisoned,

    #[error("Failed to spawn driver thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Driver thread panicked")]
    DriverPanicked,
}

impl<T> From<std::sync::PoisonError<T>> for ControlError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        ControlError::LockPoisoned
    }
}

/// Start the simulation with `engine`. Spawns the driver thread.
pub fn start(state: &AppState, engine: SimulationEngine) -> Result<(), ControlError> {
    let mut driver = state.driver.lock()?;
    if driver.is_some() {
        return Err(ControlError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_driver(engine, state.latest_snapshot.clone())?;

    *state.command_tx.lock()? = Some(cmd_tx);
    *driver = Some(handle);
    Ok(())
}

/// Send an operator command to the simulation.
pub fn send_command(state: &AppState, command: OperatorCommand) -> Result<(), ControlError> {
    let tx_lock = state.command_tx.lock()?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(DriverCommand::Operator(command))
            .map_err(|_| ControlError::ChannelClosed),
        None => Err(ControlError::NotStarted),
    }
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<WorldSnapshot>, ControlError> {
    let lock = state.latest_snapshot.lock()?;
    Ok(lock.clone())
}

/// Stop the driver after it applies every command already sent.
pub fn stop(state: &AppState) -> Result<(), ControlError> {
    let handle = state.driver.lock()?.take().ok_or(ControlError::NotStarted)?;
    if let Some(tx) = state.command_tx.lock()?.take() {
        // A closed channel means the driver is already on its way out.
        let _ = tx.send(DriverCommand::Shutdown);
    }
    handle.join().map_err(|_| ControlError::DriverPanicked)
}
