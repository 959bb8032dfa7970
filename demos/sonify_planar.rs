use pendulum_sim::diagnostics::bob_position_planar;
use pendulum_sim::integrator::simulate_planar;
use pendulum_sim::io::wav::write_wav_file;
use pendulum_sim::sonify::{sonify, SonifyConfig};
use pendulum_sim::types::presets;

fn main() -> anyhow::Result<()> {
    let p = presets::planar_driven();
    let sol = simulate_planar(&p);
    let (x, y) = bob_position_planar(&sol.theta, p.length);

    let cfg = SonifyConfig::default();
    let audio = sonify(&sol.time, &x, &y, &cfg);

    let path = std::env::temp_dir().join("pendulum_driven.wav");
    write_wav_file(&path, &audio)?;

    println!("Driven pendulum: gamma={}, A={}, wd={}", p.gamma, p.amplitude, p.drive_freq);
    println!("{} samples @ {} Hz ({:.1} s)", audio.len(), audio.sample_rate, audio.duration());
    println!("Wrote {}", path.display());
    Ok(())
}
