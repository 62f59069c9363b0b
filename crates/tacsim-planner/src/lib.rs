//! Maneuver planning library: the "maneuver-solver math library" external
//! interface of spec §6 (Hohmann, Lambert, NMC, plane change, inclination
//! change, Lagrange, planetary transfer), plus maneuver-node lifecycle
//! helpers. `tacsim-engine`'s auto-executor consumes nodes produced here;
//! it never computes delta-V itself.

pub mod node;
pub mod solvers;

pub use node::{create_node, create_node_at_time, set_engine_params, set_node_dv, update_node_prediction};
pub use solvers::SolverResult;
