use nalgebra::{SVector, Vector2, Vector4};

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G_EARTH: f64 = 9.81; // m/s^2, the default for every parameter set

/// Smallest |sin(theta)| used as a denominator in the spherical model.
pub const EPS_SIN: f64 = 1e-8;

// ---------------------------------------------------------------------------
// State vectors
// ---------------------------------------------------------------------------

/// Generic N-dimensional state (and state derivative) vector.
pub type StateVector<const N: usize> = SVector<f64, N>;

/// Planar state: [theta, omega].
pub type PlanarState = Vector2<f64>;

/// Spherical state: [theta, phi, theta_dot, phi_dot].
pub type SphericalState = Vector4<f64>;

// ---------------------------------------------------------------------------
// Model: a parameter set that knows its own equations of motion
// ---------------------------------------------------------------------------

/// A physical model with an N-dimensional state.
///
/// Implemented by the parameter sets; this is the seam the RK4 stepper and
/// the trajectory driver are generic over.
pub trait Model<const N: usize> {
    /// dy/dt at time `t`.
    fn derivatives(&self, t: f64, y: &StateVector<N>) -> StateVector<N>;

    /// State at t = 0.
    fn initial_state(&self) -> StateVector<N>;

    /// Total simulated duration, s.
    fn t_max(&self) -> f64;

    /// Requested step, s. The actual step is the grid spacing.
    fn dt(&self) -> f64;
}
