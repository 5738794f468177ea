//! D2Q9-BGK lattice-Boltzmann solver.
//!
//! A periodic 2-D grid of cells, each holding nine directional distribution
//! values, is advanced by a fused streaming / bounce-back / BGK collision
//! sweep. One row near the top of the domain is accelerated every step to
//! drive the flow, and solid cells from an obstacle map reflect whatever
//! streams into them.

mod cli;
pub mod constants;
pub mod error;
pub mod io;
mod kernel;
pub mod momentum;
mod prelude_crate;
pub mod velocity_set;

pub mod prelude {
    pub use crate::NodeType::{self, *};
    pub use crate::constants::*;
    pub use crate::error::{LbError, LbResult};
    pub use crate::momentum::{
        self, DistributionField, Grid, Lattice, LatticeState, ObstacleMask, Parameters,
    };
    pub use crate::velocity_set::{D, Direction, Q};
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NodeType {
    Fluid = 0,
    Solid = 1,
}
