//! Game loop thread — runs the simulation engine at a fixed wall-clock
//! cadence and emits snapshots.
//!
//! The engine is created inside this thread because it's cleaner for
//! ownership. Commands arrive via `mpsc` channel. Snapshots are emitted via
//! Tauri `AppHandle` events and stored in shared state for synchronous
//! polling. Time-warp is the engine's own concern (`WarpClock`) — this loop
//! just measures real-elapsed time between iterations and hands it over as
//! `rdt`, per §4.1's clock contract.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tauri::{AppHandle, Emitter};

use tacsim_core::constants::NOMINAL_TICK_RATE;
use tacsim_core::state::WorldSnapshot;
use tacsim_engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal wall-clock duration of one host loop iteration.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / NOMINAL_TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// `scenario_url`/`preferred_player_id` mirror spec.md §6's
/// `init(scenarioUrl, playerId | "__observer__", rendererHandle)` launch
/// surface; `"__observer__"` is handled by `SimulationEngine::init` itself.
/// Returns the command sender for the IPC layer to use.
pub fn spawn_game_loop(
    app_handle: AppHandle,
    latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
    scenario_url: String,
    preferred_player_id: Option<String>,
) -> mpsc::Sender<GameLoopCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("tacsim-game-loop".into())
        .spawn(move || {
            run_game_loop(app_handle, cmd_rx, &latest_snapshot, scenario_url, preferred_player_id);
        })
        .expect("failed to spawn game loop thread");

    cmd_tx
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    app_handle: AppHandle,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<WorldSnapshot>>,
    scenario_url: String,
    preferred_player_id: Option<String>,
) {
    let mut engine = SimulationEngine::new(SimConfig::default());
    tracing::info!(scenario_url, player_id = ?preferred_player_id, "initializing simulation");
    if let Err(e) = engine.init(preferred_player_id.as_deref()) {
        tracing::error!(error = %e, "simulation init failed");
    }

    let mut next_tick_time = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        let now = Instant::now();
        let rdt = (now - last_tick).as_secs_f64();
        last_tick = now;

        let snapshot = engine.tick(rdt);

        let _ = app_handle.emit("sim:world_snapshot", &snapshot);

        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid a catch-up spiral.
            next_tick_time = now;
        }
    }
}
