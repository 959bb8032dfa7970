pub mod integrator;
pub mod runner;
pub mod solution;

pub use integrator::{rk4_step, step};
pub use runner::{integrate, simulate_many, simulate_planar, simulate_spherical, time_grid, Simulate};
pub use solution::{PlanarSolution, SphericalSolution, Trajectory};
