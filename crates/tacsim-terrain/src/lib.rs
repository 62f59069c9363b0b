//! Terrain system: heightmap elevation queries and line-of-sight.
//!
//! Heightmap loading from real-world data formats is out of scope (it
//! belongs to the scenario-file-parsing collaborator, per spec.md §1);
//! this crate owns the in-memory grid and its query math.

pub mod elevation;
pub mod grid;
pub mod los;

pub use elevation::{sample_or_sea_level, ElevationProvider};
pub use grid::{TerrainGrid, TerrainHeader};
pub use los::has_line_of_sight;
