use super::params::PlanarParams;
use super::state::{Model, PlanarState};

// ---------------------------------------------------------------------------
// Equations of motion (planar, one degree of freedom)
// ---------------------------------------------------------------------------

/// Compute [dtheta, domega] for a planar pendulum.
///
/// Terms modeled:
///   1. Gravity: -(g/L) sin(theta)
///   2. Damping: -2 gamma omega
///   3. Driving: A cos(wd t)
pub fn derivatives(t: f64, y: &PlanarState, p: &PlanarParams) -> PlanarState {
    let theta = y[0];
    let omega = y[1];

    let domega = -(p.g / p.length) * theta.sin() - 2.0 * p.gamma * omega
        + p.amplitude * (p.drive_freq * t).cos();

    PlanarState::new(omega, domega)
}

impl Model<2> for PlanarParams {
    fn derivatives(&self, t: f64, y: &PlanarState) -> PlanarState {
        derivatives(t, y, self)
    }

    fn initial_state(&self) -> PlanarState {
        PlanarState::new(self.theta0, self.omega0)
    }

    fn t_max(&self) -> f64 {
        self.t_max
    }

    fn dt(&self) -> f64 {
        self.dt
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::params::PlanarParamsBuilder;
    use approx::assert_relative_eq;

    #[test]
    fn equilibrium_is_at_rest() {
        let p = PlanarParams::default();
        let d = derivatives(0.0, &PlanarState::zeros(), &p);
        assert_eq!(d, PlanarState::zeros());
    }

    #[test]
    fn gravity_restores_toward_vertical() {
        let p = PlanarParams::default();
        let d = derivatives(0.0, &PlanarState::new(0.6, 0.0), &p);
        assert_eq!(d[0], 0.0);
        assert_relative_eq!(d[1], -9.81 * 0.6_f64.sin(), epsilon = 1e-15);
    }

    #[test]
    fn damping_opposes_velocity() {
        let p = PlanarParamsBuilder::new().gamma(0.5).build();
        let d = derivatives(0.0, &PlanarState::new(0.0, 2.0), &p);
        assert_relative_eq!(d[1], -2.0, epsilon = 1e-15);
    }

    #[test]
    fn driving_follows_cosine() {
        let p = PlanarParamsBuilder::new().amplitude(1.5).drive_freq(2.0).build();
        let t = 0.3;
        let d = derivatives(t, &PlanarState::zeros(), &p);
        assert_relative_eq!(d[1], 1.5 * (2.0 * t).cos(), epsilon = 1e-15);
    }

    #[test]
    fn model_seeds_initial_conditions() {
        let p = PlanarParamsBuilder::new().theta0(0.2).omega0(-1.0).build();
        assert_eq!(p.initial_state(), PlanarState::new(0.2, -1.0));
    }
}
