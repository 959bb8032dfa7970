use crate::dynamics::state::{Model, StateVector};

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta, generic over state dimension
// ---------------------------------------------------------------------------

/// Single RK4 step: advance `y` from `t` to `t + dt` under `f(t, y)`.
///
/// Works for any fixed-size state. Overflow is not caught; a diverging
/// system simply yields non-finite components.
pub fn rk4_step<const N: usize, F>(f: F, t: f64, y: &StateVector<N>, dt: f64) -> StateVector<N>
where
    F: Fn(f64, &StateVector<N>) -> StateVector<N>,
{
    let half = dt * 0.5;

    let k1 = f(t, y);
    let k2 = f(t + half, &(y + k1 * half));
    let k3 = f(t + half, &(y + k2 * half));
    let k4 = f(t + dt, &(y + k3 * dt));

    y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

/// RK4 step using a model's own equations of motion.
pub fn step<const N: usize, M: Model<N>>(model: &M, t: f64, y: &StateVector<N>, dt: f64) -> StateVector<N> {
    rk4_step(|t, y| model.derivatives(t, y), t, y, dt)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
