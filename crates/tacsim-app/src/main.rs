// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use tacsim_app::ipc;
use tacsim_app::state::AppState;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tauri::Builder::default()
        .manage(AppState::new())
        .invoke_handler(tauri::generate_handler![
            ipc::init_simulation,
            ipc::send_command,
            ipc::get_snapshot,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tacsim");
}
