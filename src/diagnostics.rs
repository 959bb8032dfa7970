//! Observables derived from a finished trajectory.
//!
//! Everything here is an elementwise transform: outputs have the same length
//! as the inputs. Energy is per unit mass (J/kg); it is conserved only when
//! gamma = 0 and A = 0, otherwise drift is expected.

use serde::Serialize;

use crate::dynamics::params::{PlanarParams, SphericalParams};
use crate::sim::solution::{PlanarSolution, SphericalSolution};

// ---------------------------------------------------------------------------
// Energy
// ---------------------------------------------------------------------------

/// E = 1/2 L^2 omega^2 + g L (1 - cos theta)
pub fn energy_planar(theta: &[f64], omega: &[f64], p: &PlanarParams) -> Vec<f64> {
    let l = p.length;
    theta
        .iter()
        .zip(omega)
        .map(|(th, om)| 0.5 * l * l * om * om + p.g * l * (1.0 - th.cos()))
        .collect()
}

/// E = 1/2 L^2 (theta_dot^2 + sin^2 theta phi_dot^2) + g L (1 - cos theta)
pub fn energy_spherical(
    theta: &[f64],
    theta_dot: &[f64],
    phi_dot: &[f64],
    p: &SphericalParams,
) -> Vec<f64> {
    let l = p.length;
    theta
        .iter()
        .zip(theta_dot)
        .zip(phi_dot)
        .map(|((th, td), pd)| {
            let s = th.sin();
            let kinetic = 0.5 * l * l * (td * td + s * s * pd * pd);
            let potential = p.g * l * (1.0 - th.cos());
            kinetic + potential
        })
        .collect()
}

/// (E - E0) / E0 per sample; all zeros when E0 is zero.
pub fn relative_drift(energy: &[f64]) -> Vec<f64> {
    match energy.first() {
        Some(&e0) => energy.iter().map(|&e| drift(e0, e)).collect(),
        None => Vec::new(),
    }
}

/// (e - e0) / e0, or zero when e0 is zero.
fn drift(e0: f64, e: f64) -> f64 {
    if e0 != 0.0 {
        (e - e0) / e0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Bob position of a spherical pendulum, pivot at the origin, z up.
pub fn cartesian(theta: &[f64], phi: &[f64], length: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let n = theta.len();
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    let mut z = Vec::with_capacity(n);
    for (th, ph) in theta.iter().zip(phi) {
        let (s, c) = th.sin_cos();
        x.push(length * s * ph.cos());
        y.push(length * s * ph.sin());
        z.push(-length * c);
    }
    (x, y, z)
}

/// Bob position of a planar pendulum in its plane: (L sin theta, -L cos theta).
pub fn bob_position_planar(theta: &[f64], length: f64) -> (Vec<f64>, Vec<f64>) {
    theta
        .iter()
        .map(|th| (length * th.sin(), -length * th.cos()))
        .unzip()
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Headline numbers for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub model: &'static str,
    pub samples: usize,
    pub duration: f64,
    pub initial_energy: f64,
    pub final_energy: f64,
    pub relative_drift: f64,
    pub max_abs_theta: f64,
    pub all_finite: bool,
}

impl Summary {
    pub fn from_planar(sol: &PlanarSolution) -> Self {
        let all_finite = [&sol.theta, &sol.omega, &sol.energy]
            .iter()
            .all(|v| v.iter().all(|x| x.is_finite()));
        Self::build("planar", &sol.time, &sol.theta, &sol.energy, all_finite)
    }

    pub fn from_spherical(sol: &SphericalSolution) -> Self {
        let all_finite = [
            &sol.theta,
            &sol.phi,
            &sol.theta_dot,
            &sol.phi_dot,
            &sol.x,
            &sol.y,
            &sol.z,
            &sol.energy,
        ]
        .iter()
        .all(|v| v.iter().all(|x| x.is_finite()));
        Self::build("spherical", &sol.time, &sol.theta, &sol.energy, all_finite)
    }

    fn build(
        model: &'static str,
        time: &[f64],
        theta: &[f64],
        energy: &[f64],
        all_finite: bool,
    ) -> Self {
        let initial_energy = energy.first().copied().unwrap_or(0.0);
        let final_energy = energy.last().copied().unwrap_or(0.0);

        Summary {
            model,
            samples: time.len(),
            duration: time.last().copied().unwrap_or(0.0),
            initial_energy,
            final_energy,
            relative_drift: drift(initial_energy, final_energy),
            max_abs_theta: theta.iter().fold(0.0_f64, |m, t| m.max(t.abs())),
            all_finite,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
