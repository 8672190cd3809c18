//! Driver thread: runs the simulation engine at 60 Hz and publishes snapshots.
//!
//! The engine is moved into the thread, which owns it from then on. Commands
//! arrive via `mpsc` channel. Snapshots are stored in shared state for
//! synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tactrainer_core::constants::TICK_RATE;
use tactrainer_core::state::WorldSnapshot;
use tactrainer_sim::engine::SimulationEngine;

use crate::state::DriverCommand;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawn the driver thread around `engine`.
///
/// Returns the command sender for the control surface and the thread handle.
pub fn spawn_driver(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
) -> io::Result<(mpsc::Sender<DriverCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<DriverCommand>();

    let handle = std::thread::Builder::new()
        .name("tactrainer-driver".into())
        .spawn(move || {
            run_driver(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The driver loop. Runs until Shutdown or channel disconnect.
fn run_driver(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<DriverCommand>,
    latest_snapshot: &Mutex<Option<WorldSnapshot>>,
) {
    let mut next_tick_time = Instant::now();
    tracing::info!("Driver started");

    loop {
        // 1. Drain all pending commands
        let mut shutdown = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(DriverCommand::Operator(cmd)) => engine.queue_command(cmd),
                Ok(DriverCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    shutdown = true;
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause and freeze internally)
        let snapshot = engine.tick();

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if shutdown {
            tracing::info!(tick = engine.time().tick, "Driver stopped");
            return;
        }

        // 4. Sleep until next tick, adjusting for time scale
        let effective_tick_duration = scaled_tick_duration(engine.time_scale());
        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Wall-clock time per tick at `time_scale`. A frozen engine keeps the 1x pace.
pub fn scaled_tick_duration(time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}
