use serde::{Deserialize, Serialize};

use super::state::G_EARTH;
use crate::error::{PendulumError, Result};

// ---------------------------------------------------------------------------
// Planar pendulum parameters
// ---------------------------------------------------------------------------

/// Parameter set for one planar run. Copy it to start a new run; the
/// simulation only ever borrows it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanarParams {
    pub g: f64,                     // m/s^2
    #[serde(alias = "L")]
    pub length: f64,                // m
    pub theta0: f64,                // rad
    pub omega0: f64,                // rad/s
    pub t_max: f64,                 // s
    pub dt: f64,                    // s
    pub gamma: f64,                 // 1/s, drag is 2*gamma*omega
    #[serde(alias = "A")]
    pub amplitude: f64,             // rad/s^2, driving amplitude
    #[serde(alias = "wd")]
    pub drive_freq: f64,            // rad/s
}

impl Default for PlanarParams {
    fn default() -> Self {
        Self {
            g: G_EARTH,
            length: 1.0,
            theta0: 0.6,
            omega0: 0.0,
            t_max: 10.0,
            dt: 0.01,
            gamma: 0.0,
            amplitude: 0.0,
            drive_freq: 2.0,
        }
    }
}

impl PlanarParams {
    /// Number of samples the trajectory will hold: floor(t_max/dt) + 1.
    pub fn sample_count(&self) -> usize {
        sample_count(self.t_max, self.dt)
    }

    /// True when neither damping nor driving is active.
    pub fn is_conservative(&self) -> bool {
        self.gamma == 0.0 && self.amplitude == 0.0
    }

    /// Range checks for values coming from untrusted input.
    /// The integrator itself never calls this.
    pub fn validate(&self) -> Result<()> {
        check_common(self.g, self.length, self.gamma, self.amplitude, self.drive_freq)?;
        check_finite("theta0", self.theta0)?;
        check_finite("omega0", self.omega0)?;
        check_time(self.t_max, self.dt)
    }
}

// ---------------------------------------------------------------------------
// Spherical pendulum parameters
// ---------------------------------------------------------------------------

/// Parameter set for one spherical run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphericalParams {
    pub g: f64,                     // m/s^2
    #[serde(alias = "L")]
    pub length: f64,                // m
    pub gamma: f64,                 // 1/s
    #[serde(alias = "A")]
    pub amplitude: f64,             // rad/s^2, acts on theta only
    #[serde(alias = "wd")]
    pub drive_freq: f64,            // rad/s
    pub theta0: f64,                // rad from the downward vertical
    pub phi0: f64,                  // rad, azimuth
    pub theta_dot0: f64,            // rad/s
    pub phi_dot0: f64,              // rad/s
    pub t_max: f64,                 // s
    pub dt: f64,                    // s
}

impl Default for SphericalParams {
    fn default() -> Self {
        Self {
            g: G_EARTH,
            length: 1.0,
            gamma: 0.0,
            amplitude: 0.0,
            drive_freq: 2.0,
            theta0: 0.6,
            phi0: 0.0,
            theta_dot0: 0.0,
            phi_dot0: 2.0,
            t_max: 10.0,
            dt: 0.01,
        }
    }
}

impl SphericalParams {
    pub fn sample_count(&self) -> usize {
        sample_count(self.t_max, self.dt)
    }

    pub fn is_conservative(&self) -> bool {
        self.gamma == 0.0 && self.amplitude == 0.0
    }

    /// Range checks for values coming from untrusted input.
    pub fn validate(&self) -> Result<()> {
        check_common(self.g, self.length, self.gamma, self.amplitude, self.drive_freq)?;
        check_finite("theta0", self.theta0)?;
        check_finite("phi0", self.phi0)?;
        check_finite("theta_dot0", self.theta_dot0)?;
        check_finite("phi_dot0", self.phi_dot0)?;
        check_time(self.t_max, self.dt)
    }
}

/// Largest trajectory a validated parameter set may request.
pub const MAX_SAMPLES: usize = 100_000_000;

/// floor(t_max/dt) + 1, the length of every trajectory. Saturates at
/// `usize::MAX` for ratios no trajectory could hold.
pub fn sample_count(t_max: f64, dt: f64) -> usize {
    ((t_max / dt).floor() as usize).saturating_add(1)
}

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PendulumError::out_of_range(field, value, "must be finite"))
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(PendulumError::out_of_range(field, value, "must be > 0"))
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    check_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(PendulumError::out_of_range(field, value, "must be >= 0"))
    }
}

fn check_common(g: f64, length: f64, gamma: f64, amplitude: f64, drive_freq: f64) -> Result<()> {
    check_positive("g", g)?;
    check_positive("L", length)?;
    check_non_negative("gamma", gamma)?;
    check_non_negative("A", amplitude)?;
    check_positive("wd", drive_freq)
}

fn check_time(t_max: f64, dt: f64) -> Result<()> {
    check_positive("t_max", t_max)?;
    check_positive("dt", dt)?;
    if dt > t_max {
        return Err(PendulumError::out_of_range("dt", dt, "must not exceed t_max"));
    }
    if sample_count(t_max, dt) > MAX_SAMPLES {
        return Err(PendulumError::out_of_range("dt", dt, "too small for t_max, trajectory too long"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub struct PlanarParamsBuilder {
    params: PlanarParams,
}

impl PlanarParamsBuilder {
    pub fn new() -> Self {
        Self { params: PlanarParams::default() }
    }

    pub fn g(mut self, v: f64) -> Self { self.params.g = v; self }
    pub fn length(mut self, v: f64) -> Self { self.params.length = v; self }
    pub fn theta0(mut self, v: f64) -> Self { self.params.theta0 = v; self }
    pub fn omega0(mut self, v: f64) -> Self { self.params.omega0 = v; self }
    pub fn t_max(mut self, v: f64) -> Self { self.params.t_max = v; self }
    pub fn dt(mut self, v: f64) -> Self { self.params.dt = v; self }
    pub fn gamma(mut self, v: f64) -> Self { self.params.gamma = v; self }
    pub fn amplitude(mut self, v: f64) -> Self { self.params.amplitude = v; self }
    pub fn drive_freq(mut self, v: f64) -> Self { self.params.drive_freq = v; self }

    pub fn build(self) -> PlanarParams {
        self.params
    }
}

impl Default for PlanarParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SphericalParamsBuilder {
    params: SphericalParams,
}

impl SphericalParamsBuilder {
    pub fn new() -> Self {
        Self { params: SphericalParams::default() }
    }

    pub fn g(mut self, v: f64) -> Self { self.params.g = v; self }
    pub fn length(mut self, v: f64) -> Self { self.params.length = v; self }
    pub fn gamma(mut self, v: f64) -> Self { self.params.gamma = v; self }
    pub fn amplitude(mut self, v: f64) -> Self { self.params.amplitude = v; self }
    pub fn drive_freq(mut self, v: f64) -> Self { self.params.drive_freq = v; self }
    pub fn theta0(mut self, v: f64) -> Self { self.params.theta0 = v; self }
    pub fn phi0(mut self, v: f64) -> Self { self.params.phi0 = v; self }
    pub fn theta_dot0(mut self, v: f64) -> Self { self.params.theta_dot0 = v; self }
    pub fn phi_dot0(mut self, v: f64) -> Self { self.params.phi_dot0 = v; self }
    pub fn t_max(mut self, v: f64) -> Self { self.params.t_max = v; self }
    pub fn dt(mut self, v: f64) -> Self { self.params.dt = v; self }

    pub fn build(self) -> SphericalParams {
        self.params
    }
}

impl Default for SphericalParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Undamped, undriven 0.6 rad swing for 10 s.
    pub fn planar_default() -> PlanarParams {
        PlanarParams::default()
    }

    /// Damped pendulum driven near resonance.
    pub fn planar_driven() -> PlanarParams {
        PlanarParamsBuilder::new()
            .gamma(0.15)
            .amplitude(1.2)
            .drive_freq(3.0)
            .t_max(30.0)
            .build()
    }

    /// Precessing rosette orbit.
    pub fn rosette() -> SphericalParams {
        SphericalParamsBuilder::new()
            .theta0(0.8)
            .phi0(0.0)
            .theta_dot0(0.25)
            .phi_dot0(1.7)
            .t_max(20.0)
            .dt(0.01)
            .build()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_matches_floor_rule() {
        assert_eq!(sample_count(10.0, 0.01), 1001);
        assert_eq!(sample_count(1.0, 0.5), 3);
        assert_eq!(sample_count(2.0, 0.3), 7);
        assert_eq!(sample_count(1.0, 0.3), 4);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(PlanarParams::default().validate().is_ok());
        assert!(SphericalParams::default().validate().is_ok());
        assert!(presets::rosette().validate().is_ok());
        assert!(presets::planar_driven().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_length() {
        let p = PlanarParamsBuilder::new().length(0.0).build();
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("L"), "Error should name the field: {}", err);
    }

    #[test]
    fn rejects_dt_larger_than_t_max() {
        let p = SphericalParamsBuilder::new().t_max(0.5).dt(1.0).build();
        assert!(p.validate().is_err());
    }

    #[test]
    fn huge_ratio_saturates_and_is_rejected() {
        assert_eq!(sample_count(1e20, 1.0), usize::MAX);
        let err = PlanarParamsBuilder::new().t_max(1e20).dt(1.0).build().validate().unwrap_err();
        assert!(matches!(err, PendulumError::OutOfRange { field: "dt", .. }), "got {}", err);

        assert!(PlanarParamsBuilder::new().t_max(1e5).dt(0.01).build().validate().is_ok());
        assert!(SphericalParamsBuilder::new().t_max(1e7).dt(0.01).build().validate().is_err());
    }

    #[test]
    fn rejects_negative_damping_and_nan() {
        assert!(PlanarParamsBuilder::new().gamma(-0.1).build().validate().is_err());
        assert!(PlanarParamsBuilder::new().theta0(f64::NAN).build().validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let p: SphericalParams = serde_json::from_str(r#"{ "L": 2.0, "A": 0.5 }"#).unwrap();
        assert_eq!(p.length, 2.0);
        assert_eq!(p.amplitude, 0.5);
        assert_eq!(p.phi_dot0, 2.0);
        assert_eq!(p.dt, 0.01);
    }

    #[test]
    fn conservative_flag() {
        assert!(PlanarParams::default().is_conservative());
        assert!(!presets::planar_driven().is_conservative());
    }
}
