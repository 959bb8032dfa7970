//! Turn a bob trajectory into a stereo waveform.
//!
//! Horizontal position drives pitch (exponentially, so equal steps sound
//! like equal intervals) and stereo pan; speed drives loudness.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SonifyConfig {
    pub sample_rate: u32,           // Hz
    pub base_freq: f64,             // Hz at x = 0
    pub pitch_sensitivity: f64,     // octaves at full deflection
    pub amp_base: f64,
    pub amp_gain: f64,
    pub pan_strength: f64,          // 0 = mono, 1 = hard pan at full deflection
}

impl Default for SonifyConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            base_freq: 220.0,
            pitch_sensitivity: 1.5,
            amp_base: 0.05,
            amp_gain: 0.4,
            pan_strength: 0.9,
        }
    }
}

/// Two channels of floating-point samples, nominally in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct StereoBuffer {
    pub left: Vec<f64>,
    pub right: Vec<f64>,
    pub sample_rate: u32,
}

impl StereoBuffer {
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }
}

// ---------------------------------------------------------------------------
// Signal helpers
// ---------------------------------------------------------------------------

/// Piecewise-linear interpolation of (xp, fp) at `x`, clamped to the end
/// values outside [xp[0], xp[n-1]]. `xp` must be increasing.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return 0.0;
    }
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }
    // first index with xp[j] > x; 1 <= j <= n-1 here
    let j = xp[..n].partition_point(|&v| v <= x);
    let (x0, x1) = (xp[j - 1], xp[j]);
    let (f0, f1) = (fp[j - 1], fp[j]);
    if x1 == x0 {
        return f0;
    }
    f0 + (f1 - f0) * (x - x0) / (x1 - x0)
}

/// Numerical derivative with uniform spacing `h`: central differences
/// inside, one-sided differences at both ends.
pub fn gradient(f: &[f64], h: f64) -> Vec<f64> {
    let n = f.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let mut out = Vec::with_capacity(n);
    out.push((f[1] - f[0]) / h);
    for i in 1..n - 1 {
        out.push((f[i + 1] - f[i - 1]) / (2.0 * h));
    }
    out.push((f[n - 1] - f[n - 2]) / h);
    out
}

fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0_f64, |m, x| m.max(x.abs()))
}

// ---------------------------------------------------------------------------
// Sonification
// ---------------------------------------------------------------------------

/// Sonify a planar path (x(t), y(t)) sampled at times `t`.
///
/// The path is resampled onto an audio-rate grid covering [t0, t_end)
/// before any mapping. Fewer than two samples, or a zero duration, give an
/// empty buffer.
pub fn sonify(t: &[f64], x: &[f64], y: &[f64], cfg: &SonifyConfig) -> StereoBuffer {
    let empty = StereoBuffer {
        left: Vec::new(),
        right: Vec::new(),
        sample_rate: cfg.sample_rate,
    };
    if t.len() < 2 {
        return empty;
    }

    let sr = cfg.sample_rate as f64;
    let t0 = t[0];
    let duration = t[t.len() - 1] - t0;
    let n = (duration * sr).floor().max(0.0) as usize;
    if n == 0 {
        return empty;
    }

    let step = duration / n as f64;
    let ta: Vec<f64> = (0..n).map(|i| t0 + i as f64 * step).collect();
    let xa: Vec<f64> = ta.iter().map(|&ti| interp(ti, t, x)).collect();
    let ya: Vec<f64> = ta.iter().map(|&ti| interp(ti, t, y)).collect();

    let vx = gradient(&xa, 1.0 / sr);
    let vy = gradient(&ya, 1.0 / sr);
    let speed: Vec<f64> = vx.iter().zip(&vy).map(|(a, b)| a.hypot(*b)).collect();

    let x_scale = max_abs(&xa) + 1e-9;
    let speed_scale = speed.iter().fold(0.0_f64, |m, s| m.max(*s)) + 1e-9;

    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);
    let mut phase = 0.0;

    for i in 0..n {
        let x_norm = xa[i] / x_scale;
        let freq = cfg.base_freq * 2f64.powf(cfg.pitch_sensitivity * x_norm);
        let amp = (cfg.amp_base + cfg.amp_gain * speed[i] / speed_scale).clamp(0.0, 1.0);

        phase += TAU * freq / sr;
        let mono = amp * phase.sin();

        let pan = (0.5 + 0.5 * cfg.pan_strength * x_norm).clamp(0.0, 1.0);
        left.push(mono * (1.0 - pan).sqrt());
        right.push(mono * pan.sqrt());
    }

    debug!(samples = n, sample_rate = cfg.sample_rate, "Sonified trajectory");

    StereoBuffer {
        left,
        right,
        sample_rate: cfg.sample_rate,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn interp_is_linear_and_clamped() {
        let xp = [0.0, 1.0, 3.0];
        let fp = [0.0, 10.0, 30.0];
        assert_eq!(interp(-1.0, &xp, &fp), 0.0);
        assert_eq!(interp(0.5, &xp, &fp), 5.0);
        assert_eq!(interp(1.0, &xp, &fp), 10.0);
        assert_eq!(interp(2.0, &xp, &fp), 20.0);
        assert_eq!(interp(4.0, &xp, &fp), 30.0);
    }

    #[test]
    fn gradient_of_a_line_is_constant() {
        let f: Vec<f64> = (0..5).map(|i| 3.0 * i as f64 * 0.1).collect();
        for g in gradient(&f, 0.1) {
            assert_relative_eq!(g, 3.0, epsilon = 1e-12);
        }
        assert_eq!(gradient(&[1.0], 0.1), vec![0.0]);
    }

    #[test]
    fn buffer_length_follows_duration() {
        let cfg = SonifyConfig { sample_rate: 1000, ..Default::default() };
        let t = [0.0, 0.5, 1.0, 1.5, 2.0];
        let x = [0.0, 0.5, 0.0, -0.5, 0.0];
        let y = [-1.0, -0.8, -1.0, -0.8, -1.0];
        let buf = sonify(&t, &x, &y, &cfg);
        assert_eq!(buf.len(), 2000);
        assert_eq!(buf.right.len(), 2000);
        assert_relative_eq!(buf.duration(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn samples_stay_in_unit_range() {
        let t: Vec<f64> = (0..101).map(|i| i as f64 * 0.01).collect();
        let x: Vec<f64> = t.iter().map(|ti| (6.0 * ti).sin()).collect();
        let y: Vec<f64> = t.iter().map(|ti| -(6.0 * ti).cos()).collect();
        let buf = sonify(&t, &x, &y, &SonifyConfig::default());
        assert!(!buf.is_empty());
        assert!(buf.left.iter().chain(&buf.right).all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn positive_x_pans_right() {
        let cfg = SonifyConfig { sample_rate: 8000, ..Default::default() };
        let t = [0.0, 1.0];
        let x = [1.0, 1.0];
        let y = [0.0, 0.0];
        let buf = sonify(&t, &x, &y, &cfg);
        let energy = |v: &[f64]| v.iter().map(|s| s * s).sum::<f64>();
        assert!(energy(&buf.right) > 10.0 * energy(&buf.left));
    }

    #[test]
    fn too_short_input_is_empty() {
        let cfg = SonifyConfig::default();
        assert!(sonify(&[0.0], &[0.0], &[0.0], &cfg).is_empty());
        assert!(sonify(&[1.0, 1.0], &[0.0, 1.0], &[0.0, 0.0], &cfg).is_empty());
    }
}
