use super::params::SphericalParams;
use super::state::{Model, SphericalState, EPS_SIN};

// ---------------------------------------------------------------------------
// Equations of motion (spherical, two degrees of freedom)
// ---------------------------------------------------------------------------

/// Compute [dtheta, dphi, dtheta_dot, dphi_dot] for a spherical pendulum.
///
/// theta is measured from the downward vertical, phi is the azimuth.
/// Damping acts on both rates; the driving term acts on theta only.
///
/// The azimuthal equation contains cot(theta), which is singular on the
/// vertical axis. There sin(theta) is replaced by ±EPS_SIN (see
/// [`clamped_sin`]). This is a smoothing approximation: it keeps every
/// output finite but is not the physical limit of the motion.
pub fn derivatives(t: f64, y: &SphericalState, p: &SphericalParams) -> SphericalState {
    let theta = y[0];
    let theta_dot = y[2];
    let phi_dot = y[3];

    let (sin_th, cos_th) = theta.sin_cos();

    let dtheta_dot = sin_th * cos_th * phi_dot * phi_dot - (p.g / p.length) * sin_th
        - 2.0 * p.gamma * theta_dot
        + p.amplitude * (p.drive_freq * t).cos();

    let cot_th = cos_th / clamped_sin(sin_th);
    let dphi_dot = -2.0 * cot_th * theta_dot * phi_dot - 2.0 * p.gamma * phi_dot;

    SphericalState::new(theta_dot, phi_dot, dtheta_dot, dphi_dot)
}

/// sin(theta) pushed away from zero: values with |s| <= EPS_SIN become
/// ±EPS_SIN, keeping the sign (an exact zero counts as positive).
pub fn clamped_sin(s: f64) -> f64 {
    if s.abs() > EPS_SIN {
        s
    } else if s >= 0.0 {
        EPS_SIN
    } else {
        -EPS_SIN
    }
}

impl Model<4> for SphericalParams {
    fn derivatives(&self, t: f64, y: &SphericalState) -> SphericalState {
        derivatives(t, y, self)
    }

    fn initial_state(&self) -> SphericalState {
        SphericalState::new(self.theta0, self.phi0, self.theta_dot0, self.phi_dot0)
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
    use crate::dynamics::params::SphericalParamsBuilder;
    use crate::dynamics::planar;
    use crate::dynamics::params::PlanarParamsBuilder;
    use crate::dynamics::state::PlanarState;
    use approx::assert_relative_eq;

    #[test]
    fn clamp_preserves_sign() {
        assert_eq!(clamped_sin(0.0), EPS_SIN);
        assert_eq!(clamped_sin(1e-12), EPS_SIN);
        assert_eq!(clamped_sin(-1e-12), -EPS_SIN);
        assert_eq!(clamped_sin(0.5), 0.5);
        assert_eq!(clamped_sin(-0.5), -0.5);
    }

    #[test]
    fn finite_on_the_vertical_axis() {
        let p = SphericalParams::default();
        for theta in [0.0, std::f64::consts::PI, -std::f64::consts::PI] {
            let d = derivatives(1.0, &SphericalState::new(theta, 0.3, 0.7, 1.1), &p);
            assert!(
                d.iter().all(|v| v.is_finite()),
                "Derivative must stay finite at theta={}, got {:?}",
                theta,
                d
            );
        }
    }

    #[test]
    fn zero_azimuthal_rate_reduces_to_planar() {
        let sp = SphericalParamsBuilder::new().gamma(0.2).amplitude(0.8).drive_freq(1.3).build();
        let pp = PlanarParamsBuilder::new().gamma(0.2).amplitude(0.8).drive_freq(1.3).build();
        let t = 0.7;
        let ds = derivatives(t, &SphericalState::new(0.4, 1.0, -0.3, 0.0), &sp);
        let dp = planar::derivatives(t, &PlanarState::new(0.4, -0.3), &pp);
        assert_relative_eq!(ds[2], dp[1], epsilon = 1e-14);
        assert_eq!(ds[3], 0.0);
    }

    #[test]
    fn damping_acts_on_both_rates() {
        let p = SphericalParamsBuilder::new().gamma(0.3).build();
        let d = derivatives(0.0, &SphericalState::new(0.6, 0.2, 0.4, 1.5), &p);
        assert_eq!(d[0], 0.4);
        assert_eq!(d[1], 1.5);
        assert_relative_eq!(d[2], -4.730598692292167, epsilon = 1e-12);
        assert_relative_eq!(d[3], -2.6540351364937225, epsilon = 1e-12);

        let undamped = derivatives(0.0, &SphericalState::new(0.6, 0.2, 0.4, 1.5), &SphericalParams::default());
        assert_relative_eq!(d[3] - undamped[3], -2.0 * 0.3 * 1.5, epsilon = 1e-12);
    }

    #[test]
    fn conical_orbit_balances_gravity() {
        // Steady conical motion: phi_dot^2 = g / (L cos theta).
        let theta: f64 = 0.5;
        let p = SphericalParams::default();
        let phi_dot = (p.g / (p.length * theta.cos())).sqrt();
        let d = derivatives(0.0, &SphericalState::new(theta, 0.0, 0.0, phi_dot), &p);
        assert_relative_eq!(d[2], 0.0, epsilon = 1e-12);
        assert_eq!(d[3], 0.0);
    }

    #[test]
    fn model_seeds_initial_conditions() {
        let p = SphericalParamsBuilder::new()
            .theta0(0.8)
            .phi0(0.1)
            .theta_dot0(0.25)
            .phi_dot0(1.7)
            .build();
        assert_eq!(p.initial_state(), SphericalState::new(0.8, 0.1, 0.25, 1.7));
    }
}
