//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World`/`&mut WorldRegistry`
//! (or a `&`-reference for read-only systems). They do not own state — all
//! state lives in components.

pub mod ai;
pub mod cleanup;
pub mod comm;
pub mod cyber;
pub mod physics;
pub mod snapshot;
