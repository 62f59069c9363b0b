//! Tauri application host for the simulation engine.
//!
//! This crate wires the engine crates together and exposes them to the
//! frontend via Tauri IPC commands and events.

pub mod game_loop;
pub mod ipc;
pub mod state;

pub use tacsim_core as core;
