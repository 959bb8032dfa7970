pub mod dynamics;
pub mod sim;
pub mod diagnostics;
pub mod config;
pub mod session;
pub mod sonify;
pub mod io;
pub mod error;

pub use error::{PendulumError, Result};

// Flat entry points for callers that only want trajectories
pub mod integrator {
    pub use crate::sim::runner::{integrate, simulate_many, simulate_planar, simulate_spherical};
    pub use crate::sim::integrator::{rk4_step, step};
}

pub mod types {
    pub use crate::dynamics::params::{PlanarParams, SphericalParams, presets};
    pub use crate::dynamics::state::{PlanarState, SphericalState, G_EARTH, EPS_SIN};
    pub use crate::sim::solution::{PlanarSolution, SphericalSolution, Trajectory};
}
