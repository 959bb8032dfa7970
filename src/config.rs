//! Input boundary: scenario files and editable text fields.
//!
//! A scenario file is a JSON document tagged by model. Missing fields take
//! their defaults:
//!
//! ```json
//! { "model": "spherical", "theta0": 0.8, "theta_dot0": 0.25, "phi_dot0": 1.7, "t_max": 20.0 }
//! ```
//!
//! Text fields come from a UI. Every value is parsed and range-checked here,
//! so the integrator only ever sees well-formed parameter sets.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dynamics::params::{PlanarParams, SphericalParams};
use crate::error::{PendulumError, Result};

// ---------------------------------------------------------------------------
// Scenario files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum Scenario {
    Planar(PlanarParams),
    Spherical(SphericalParams),
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        match self {
            Scenario::Planar(p) => p.validate(),
            Scenario::Spherical(p) => p.validate(),
        }
    }
}

/// Parse and validate a scenario document.
pub fn parse_scenario(text: &str) -> Result<Scenario> {
    let scenario: Scenario = serde_json::from_str(text)?;
    scenario.validate()?;
    Ok(scenario)
}

/// Read, parse, and validate a scenario file.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let scenario = parse_scenario(&text)?;
    info!(path = %path.display(), "Loaded scenario");
    Ok(scenario)
}

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// Parse one numeric text field, naming the field on failure.
pub fn parse_field(name: &str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| PendulumError::invalid_field(name, text))
}

/// Editable string form of a planar parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarForm {
    pub g: String,
    pub length: String,
    pub theta0: String,
    pub omega0: String,
    pub t_max: String,
    pub dt: String,
    pub gamma: String,
    pub amplitude: String,
    pub drive_freq: String,
}

impl PlanarForm {
    pub fn from_params(p: &PlanarParams) -> Self {
        Self {
            g: p.g.to_string(),
            length: p.length.to_string(),
            theta0: p.theta0.to_string(),
            omega0: p.omega0.to_string(),
            t_max: p.t_max.to_string(),
            dt: p.dt.to_string(),
            gamma: p.gamma.to_string(),
            amplitude: p.amplitude.to_string(),
            drive_freq: p.drive_freq.to_string(),
        }
    }

    /// Labelled mutable fields, in display order.
    pub fn fields_mut(&mut self) -> [(&'static str, &mut String); 9] {
        [
            ("g", &mut self.g),
            ("L", &mut self.length),
            ("theta0", &mut self.theta0),
            ("omega0", &mut self.omega0),
            ("t_max", &mut self.t_max),
            ("dt", &mut self.dt),
            ("gamma", &mut self.gamma),
            ("A", &mut self.amplitude),
            ("wd", &mut self.drive_freq),
        ]
    }

    pub fn parse(&self) -> Result<PlanarParams> {
        let p = PlanarParams {
            g: parse_field("g", &self.g)?,
            length: parse_field("L", &self.length)?,
            theta0: parse_field("theta0", &self.theta0)?,
            omega0: parse_field("omega0", &self.omega0)?,
            t_max: parse_field("t_max", &self.t_max)?,
            dt: parse_field("dt", &self.dt)?,
            gamma: parse_field("gamma", &self.gamma)?,
            amplitude: parse_field("A", &self.amplitude)?,
            drive_freq: parse_field("wd", &self.drive_freq)?,
        };
        p.validate()?;
        Ok(p)
    }
}

/// Editable string form of a spherical parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalForm {
    pub g: String,
    pub length: String,
    pub gamma: String,
    pub amplitude: String,
    pub drive_freq: String,
    pub theta0: String,
    pub phi0: String,
    pub theta_dot0: String,
    pub phi_dot0: String,
    pub t_max: String,
    pub dt: String,
}

impl SphericalForm {
    pub fn from_params(p: &SphericalParams) -> Self {
        Self {
            g: p.g.to_string(),
            length: p.length.to_string(),
            gamma: p.gamma.to_string(),
            amplitude: p.amplitude.to_string(),
            drive_freq: p.drive_freq.to_string(),
            theta0: p.theta0.to_string(),
            phi0: p.phi0.to_string(),
            theta_dot0: p.theta_dot0.to_string(),
            phi_dot0: p.phi_dot0.to_string(),
            t_max: p.t_max.to_string(),
            dt: p.dt.to_string(),
        }
    }

    pub fn fields_mut(&mut self) -> [(&'static str, &mut String); 11] {
        [
            ("g", &mut self.g),
            ("L", &mut self.length),
            ("gamma", &mut self.gamma),
            ("A", &mut self.amplitude),
            ("wd", &mut self.drive_freq),
            ("theta0", &mut self.theta0),
            ("phi0", &mut self.phi0),
            ("theta_dot0", &mut self.theta_dot0),
            ("phi_dot0", &mut self.phi_dot0),
            ("t_max", &mut self.t_max),
            ("dt", &mut self.dt),
        ]
    }

    pub fn parse(&self) -> Result<SphericalParams> {
        let p = SphericalParams {
            g: parse_field("g", &self.g)?,
            length: parse_field("L", &self.length)?,
            gamma: parse_field("gamma", &self.gamma)?,
            amplitude: parse_field("A", &self.amplitude)?,
            drive_freq: parse_field("wd", &self.drive_freq)?,
            theta0: parse_field("theta0", &self.theta0)?,
            phi0: parse_field("phi0", &self.phi0)?,
            theta_dot0: parse_field("theta_dot0", &self.theta_dot0)?,
            phi_dot0: parse_field("phi_dot0", &self.phi_dot0)?,
            t_max: parse_field("t_max", &self.t_max)?,
            dt: parse_field("dt", &self.dt)?,
        };
        p.validate()?;
        Ok(p)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
