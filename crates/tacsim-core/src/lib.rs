//! Core types and definitions for the tactical simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, constants, and the
//! error taxonomy. It has no dependency on hecs, Tauri, or any runtime
//! framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod preferences;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
