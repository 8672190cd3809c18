//! Application state shared between the control surface and the driver thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tactrainer_core::commands::OperatorCommand;
use tactrainer_core::state::WorldSnapshot;

/// Messages sent from the control surface to the driver thread.
#[derive(Debug)]
pub enum DriverCommand {
    /// An operator command to forward to the simulation engine.
    Operator(OperatorCommand),
    /// Apply anything still queued, publish a last snapshot, and stop.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` because it is Send but not Sync
/// - `Mutex<Option<...>>` holds state that does not exist before `start`
/// - the latest snapshot is `Arc<Mutex<...>>`, shared with the driver thread
pub struct AppState {
    /// Channel to the driver thread. `None` before `start`.
    pub command_tx: Mutex<Option<mpsc::Sender<DriverCommand>>>,
    /// Latest snapshot for synchronous polling. Updated after each tick.
    pub latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
    /// Driver thread handle, joined on `stop`.
    pub driver: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            driver: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a driver thread has been started and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.driver.lock().map(|d| d.is_some()).unwrap_or(false)
    }
}
