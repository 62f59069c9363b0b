//! Simulation engine: the hecs-backed ECS world, clock, player hijack
//! manager, and the per-tick systems that advance it.

pub mod autoexec;
pub mod clock;
pub mod engine;
pub mod player;
pub mod pointing;
pub mod systems;
pub mod terrain_follow;
pub mod viz;
pub mod world;
pub mod world_setup;

pub use tacsim_core as core;
pub use engine::{SimConfig, SimulationEngine};
