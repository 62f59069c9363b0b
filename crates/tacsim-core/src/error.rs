//! Error taxonomy surfaced to the host, per §7.
//!
//! Internal helpers keep returning `Option`/sentinel values exactly where
//! the spec calls for "no exception" (`getEntity`, elevation sampling,
//! scanners); `ErrorKind` exists only at the boundaries that spec.md names
//! as fallible.

use thiserror::Error;

/// Closed error taxonomy for the simulation core.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ErrorKind {
    #[error("scenario load failed: {0}")]
    ScenarioLoadFailed(String),

    #[error("no controllable entity available")]
    NoControllableEntity,

    #[error("orbital propagator diverged: {0}")]
    OrbitalUpdateFailed(String),

    #[error("burn degenerate: {0}")]
    BurnDegenerate(String),

    #[error("render error: {0}")]
    RenderError(String),

    #[error("entity id already registered: {0}")]
    DuplicateEntity(String),

    #[error("entity ineligible for assume-control: {0}")]
    IneligibleEntity(String),
}
