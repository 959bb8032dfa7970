use tracing::debug;

use crate::diagnostics;
use crate::dynamics::params::{sample_count, PlanarParams, SphericalParams};
use crate::dynamics::state::Model;
use super::integrator::step;
use super::solution::{PlanarSolution, SphericalSolution, Trajectory};

// ---------------------------------------------------------------------------
// Time grid
// ---------------------------------------------------------------------------

/// floor(t_max/dt) + 1 evenly spaced samples on [0, t_max], both ends
/// included. The spacing is t_max / (n - 1), which can differ slightly from
/// `dt`; the last sample is exactly `t_max`.
pub fn time_grid(t_max: f64, dt: f64) -> Vec<f64> {
    let n = sample_count(t_max, dt);
    if n == 1 {
        return vec![0.0];
    }
    let spacing = t_max / (n - 1) as f64;
    let mut grid: Vec<f64> = (0..n).map(|i| i as f64 * spacing).collect();
    grid[n - 1] = t_max;
    grid
}

// ---------------------------------------------------------------------------
// Generic trajectory driver
// ---------------------------------------------------------------------------

/// Integrate a model over its whole time grid.
///
/// Sample 0 is the model's initial state; each later sample is one RK4 step
/// from the previous one, with the step equal to the local grid spacing.
pub fn integrate<const N: usize, M: Model<N>>(model: &M) -> Trajectory<N> {
    let time = time_grid(model.t_max(), model.dt());
    let n = time.len();

    debug!(samples = n, dim = N, t_max = model.t_max(), "Integrating trajectory");

    let mut states = Vec::with_capacity(n);
    let mut state = model.initial_state();
    states.push(state);

    for w in time.windows(2) {
        state = step(model, w[0], &state, w[1] - w[0]);
        states.push(state);
    }

    debug!(samples = states.len(), "Trajectory complete");

    Trajectory { time, states }
}

// ---------------------------------------------------------------------------
// Model entry points
// ---------------------------------------------------------------------------

/// Simulate a planar pendulum: time, angle, rate, and energy.
pub fn simulate_planar(p: &PlanarParams) -> PlanarSolution {
    let traj = integrate(p);
    let theta = traj.component(0);
    let omega = traj.component(1);
    let energy = diagnostics::energy_planar(&theta, &omega, p);

    PlanarSolution {
        time: traj.time,
        theta,
        omega,
        energy,
    }
}

/// Simulate a spherical pendulum: angles, rates, Cartesian position, energy.
pub fn simulate_spherical(p: &SphericalParams) -> SphericalSolution {
    let traj = integrate(p);
    let theta = traj.component(0);
    let phi = traj.component(1);
    let theta_dot = traj.component(2);
    let phi_dot = traj.component(3);

    let (x, y, z) = diagnostics::cartesian(&theta, &phi, p.length);
    let energy = diagnostics::energy_spherical(&theta, &theta_dot, &phi_dot, p);

    SphericalSolution {
        time: traj.time,
        theta,
        phi,
        theta_dot,
        phi_dot,
        x,
        y,
        z,
        energy,
    }
}

// ---------------------------------------------------------------------------
// Independent runs
// ---------------------------------------------------------------------------

/// Anything that can produce a full solution from itself.
pub trait Simulate {
    type Output: Send;

    fn simulate(&self) -> Self::Output;
}

impl Simulate for PlanarParams {
    type Output = PlanarSolution;

    fn simulate(&self) -> PlanarSolution {
        simulate_planar(self)
    }
}

impl Simulate for SphericalParams {
    type Output = SphericalSolution;

    fn simulate(&self) -> SphericalSolution {
        simulate_spherical(self)
    }
}

/// Run independent parameter sets on scoped threads, one per set.
/// Results come back in input order.
pub fn simulate_many<P: Simulate + Sync>(params: &[P]) -> Vec<P::Output> {
    std::thread::scope(|s| {
        let handles: Vec<_> = params.iter().map(|p| s.spawn(move || p.simulate())).collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(out) => out,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
