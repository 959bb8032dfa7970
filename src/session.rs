//! Simulation session owned by a rendering loop.
//!
//! Holds the current parameter set, its solution, and the animation cursor.
//! Applying new input replaces all three together, or nothing at all.

use std::ops::Range;

use tracing::{info, warn};

use crate::config::{PlanarForm, SphericalForm};
use crate::dynamics::params::{PlanarParams, SphericalParams};
use crate::error::Result;
use crate::sim::runner::Simulate;
use crate::sim::solution::{PlanarSolution, SphericalSolution};

/// A solution with a sample count.
pub trait Samples {
    fn samples(&self) -> usize;
}

impl Samples for PlanarSolution {
    fn samples(&self) -> usize {
        self.len()
    }
}

impl Samples for SphericalSolution {
    fn samples(&self) -> usize {
        self.len()
    }
}

/// Text form that parses into a validated parameter set.
pub trait ParamForm {
    type Params;

    fn parse(&self) -> Result<Self::Params>;
}

impl ParamForm for PlanarForm {
    type Params = PlanarParams;

    fn parse(&self) -> Result<PlanarParams> {
        PlanarForm::parse(self)
    }
}

impl ParamForm for SphericalForm {
    type Params = SphericalParams;

    fn parse(&self) -> Result<SphericalParams> {
        SphericalForm::parse(self)
    }
}

pub type PlanarSession = Session<PlanarParams>;
pub type SphericalSession = Session<SphericalParams>;

pub struct Session<P: Simulate> {
    params: P,
    solution: P::Output,
    cursor: usize,
    frame: usize,
}

impl<P> Session<P>
where
    P: Simulate,
    P::Output: Samples,
{
    pub fn new(params: P) -> Self {
        let solution = params.simulate();
        Self { params, solution, cursor: 0, frame: 0 }
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn solution(&self) -> &P::Output {
        &self.solution
    }

    /// Index the next `advance` will return.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the frame on display, as last returned by `advance`.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Parse the form and re-simulate. On error the previous parameters,
    /// solution, and cursor are kept and the error is returned.
    pub fn apply<F: ParamForm<Params = P>>(&mut self, form: &F) -> Result<()> {
        let params = match form.parse() {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "Rejected parameter input");
                return Err(e);
            }
        };
        self.replace(params);
        Ok(())
    }

    /// Re-simulate with an already validated parameter set.
    pub fn replace(&mut self, params: P) {
        self.solution = params.simulate();
        self.params = params;
        self.cursor = 0;
        self.frame = 0;
        info!(samples = self.solution.samples(), "Session re-simulated");
    }

    /// Current frame index, then move the cursor forward (wrapping).
    pub fn advance(&mut self) -> usize {
        let n = self.solution.samples().max(1);
        let i = self.cursor % n;
        self.cursor = (i + 1) % n;
        self.frame = i;
        i
    }

    /// Indices of up to `len` samples leading up to the displayed frame,
    /// excluding the frame itself.
    pub fn trail(&self, len: usize) -> Range<usize> {
        self.frame.saturating_sub(len)..self.frame
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::params::PlanarParamsBuilder;
    use crate::error::PendulumError;

    fn short_planar() -> PlanarParams {
        PlanarParamsBuilder::new().t_max(1.0).dt(0.25).build()
    }

    #[test]
    fn apply_replaces_solution() {
        let mut session = PlanarSession::new(short_planar());
        let mut form = PlanarForm::from_params(session.params());
        form.length = "2.0".into();
        session.apply(&form).unwrap();
        assert_eq!(session.params().length, 2.0);
        assert_eq!(session.solution().len(), 5);
    }

    #[test]
    fn bad_input_keeps_previous_run() {
        let mut session = PlanarSession::new(short_planar());
        session.advance();
        session.advance();
        let before = session.solution().clone();

        let mut form = PlanarForm::from_params(session.params());
        form.theta0 = "abc".into();
        let err = session.apply(&form).unwrap_err();
        assert!(matches!(err, PendulumError::InvalidField { .. }));
        assert_eq!(*session.solution(), before);
        assert_eq!(session.cursor(), 2);
        assert_eq!(*session.params(), short_planar());
    }

    #[test]
    fn advance_wraps_around() {
        let mut session = PlanarSession::new(short_planar());
        let frames: Vec<usize> = (0..7).map(|_| session.advance()).collect();
        assert_eq!(frames, vec![0, 1, 2, 3, 4, 0, 1]);
    }

    #[test]
    fn trail_is_clipped_at_start() {
        let mut session = SphericalSession::new(SphericalParams::default());
        for _ in 0..5 {
            session.advance();
        }
        assert_eq!(session.frame(), 4);
        assert_eq!(session.trail(300), 0..4);
        assert_eq!(session.trail(2), 2..4);
    }

    #[test]
    fn trail_follows_frame_across_wrap() {
        let mut session = PlanarSession::new(short_planar());
        let n = session.solution().len();
        for _ in 0..n {
            session.advance();
        }
        // Last frame of the loop still shows everything before it
        assert_eq!(session.frame(), n - 1);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.trail(300), 0..n - 1, "trail empty while showing frame {}", n - 1);

        // First frame of the next loop has nothing behind it
        assert_eq!(session.advance(), 0);
        assert!(session.trail(300).is_empty());
        assert_eq!(session.advance(), 1);
        assert_eq!(session.trail(300), 0..1);
    }

    #[test]
    fn replace_resets_frame() {
        let mut session = PlanarSession::new(short_planar());
        session.advance();
        session.advance();
        session.replace(short_planar());
        assert_eq!(session.frame(), 0);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn spherical_form_applies() {
        let mut session = SphericalSession::new(SphericalParams::default());
        let mut form = SphericalForm::from_params(session.params());
        form.phi_dot0 = "1.7".into();
        form.t_max = "2".into();
        session.apply(&form).unwrap();
        assert_eq!(session.solution().len(), 201);
        assert_eq!(session.cursor(), 0);
    }
}
