use serde::Serialize;

use crate::dynamics::state::StateVector;

// ---------------------------------------------------------------------------
// Raw trajectory: time grid + state history
// ---------------------------------------------------------------------------

/// Full state history on the time grid. Always completely computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<const N: usize> {
    pub time: Vec<f64>,
    pub states: Vec<StateVector<N>>,
}

impl<const N: usize> Trajectory<N> {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// One state dimension as a flat array.
    pub fn component(&self, i: usize) -> Vec<f64> {
        self.states.iter().map(|s| s[i]).collect()
    }
}

// ---------------------------------------------------------------------------
// Per-model outputs handed to plotting, export, and sonification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanarSolution {
    pub time: Vec<f64>,   // s
    pub theta: Vec<f64>,  // rad
    pub omega: Vec<f64>,  // rad/s
    pub energy: Vec<f64>, // J/kg
}

impl PlanarSolution {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SphericalSolution {
    pub time: Vec<f64>,
    pub theta: Vec<f64>,
    pub phi: Vec<f64>,
    pub theta_dot: Vec<f64>,
    pub phi_dot: Vec<f64>,
    pub x: Vec<f64>,      // m, bob position with the pivot at the origin
    pub y: Vec<f64>,
    pub z: Vec<f64>,      // m, negative below the pivot
    pub energy: Vec<f64>,
}

impl SphericalSolution {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
