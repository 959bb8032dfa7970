use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use pendulum_sim::config::{self, Scenario};
use pendulum_sim::diagnostics::{self, Summary};
use pendulum_sim::io::{csv, json, wav};
use pendulum_sim::sonify::{self, SonifyConfig};
use pendulum_sim::types::{PlanarParams, PlanarSolution, SphericalParams, SphericalSolution};
use pendulum_sim::integrator;

#[derive(Parser)]
#[command(name = "pendulum-sim")]
#[command(about = "Damped, driven pendulum simulation (RK4)", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Single-angle pendulum swinging in a plane
    Planar {
        #[command(flatten)]
        params: PlanarArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Two-angle pendulum moving on a sphere
    Spherical {
        #[command(flatten)]
        params: SphericalArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct PlanarArgs {
    /// JSON scenario file; flags below override its values
    #[arg(long)]
    scenario: Option<PathBuf>,
    #[arg(long)]
    g: Option<f64>,
    /// Rod length, m
    #[arg(long)]
    length: Option<f64>,
    #[arg(long)]
    theta0: Option<f64>,
    #[arg(long)]
    omega0: Option<f64>,
    #[arg(long)]
    t_max: Option<f64>,
    #[arg(long)]
    dt: Option<f64>,
    /// Damping coefficient, drag is 2*gamma*rate
    #[arg(long)]
    gamma: Option<f64>,
    /// Driving amplitude, rad/s^2
    #[arg(long)]
    amplitude: Option<f64>,
    /// Driving angular frequency, rad/s
    #[arg(long)]
    drive_freq: Option<f64>,
}

#[derive(Args)]
struct SphericalArgs {
    #[arg(long)]
    scenario: Option<PathBuf>,
    #[arg(long)]
    g: Option<f64>,
    #[arg(long)]
    length: Option<f64>,
    #[arg(long)]
    gamma: Option<f64>,
    #[arg(long)]
    amplitude: Option<f64>,
    #[arg(long)]
    drive_freq: Option<f64>,
    #[arg(long)]
    theta0: Option<f64>,
    #[arg(long)]
    phi0: Option<f64>,
    #[arg(long)]
    theta_dot0: Option<f64>,
    #[arg(long)]
    phi_dot0: Option<f64>,
    #[arg(long)]
    t_max: Option<f64>,
    #[arg(long)]
    dt: Option<f64>,
}

#[derive(Args)]
struct OutputArgs {
    /// Write the full trajectory as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write parameters and summary as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// Sonify the bob's horizontal path into a stereo WAV
    #[arg(long)]
    wav: Option<PathBuf>,
    #[arg(long, default_value_t = 44_100)]
    sample_rate: u32,
    /// Trajectory rows to print
    #[arg(long, default_value_t = 30)]
    rows: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Planar { params, output } => {
            let p = planar_params(&params)?;
            let sol = integrator::simulate_planar(&p);
            report_planar(&p, &sol, output.rows);
            export_planar(&p, &sol, &output)
        }
        Commands::Spherical { params, output } => {
            let p = spherical_params(&params)?;
            let sol = integrator::simulate_spherical(&p);
            report_spherical(&p, &sol, output.rows);
            export_spherical(&p, &sol, &output)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// Parameter assembly: scenario file, then flag overrides, then validation
// ---------------------------------------------------------------------------

fn load(path: &PathBuf) -> Result<Scenario> {
    config::load_scenario(path).with_context(|| format!("loading scenario {}", path.display()))
}

fn planar_params(a: &PlanarArgs) -> Result<PlanarParams> {
    let mut p = match &a.scenario {
        Some(path) => match load(path)? {
            Scenario::Planar(p) => p,
            Scenario::Spherical(_) => bail!("{} is a spherical scenario", path.display()),
        },
        None => PlanarParams::default(),
    };

    if let Some(v) = a.g { p.g = v; }
    if let Some(v) = a.length { p.length = v; }
    if let Some(v) = a.theta0 { p.theta0 = v; }
    if let Some(v) = a.omega0 { p.omega0 = v; }
    if let Some(v) = a.t_max { p.t_max = v; }
    if let Some(v) = a.dt { p.dt = v; }
    if let Some(v) = a.gamma { p.gamma = v; }
    if let Some(v) = a.amplitude { p.amplitude = v; }
    if let Some(v) = a.drive_freq { p.drive_freq = v; }

    p.validate().context("invalid planar parameters")?;
    Ok(p)
}

fn spherical_params(a: &SphericalArgs) -> Result<SphericalParams> {
    let mut p = match &a.scenario {
        Some(path) => match load(path)? {
            Scenario::Spherical(p) => p,
            Scenario::Planar(_) => bail!("{} is a planar scenario", path.display()),
        },
        None => SphericalParams::default(),
    };

    if let Some(v) = a.g { p.g = v; }
    if let Some(v) = a.length { p.length = v; }
    if let Some(v) = a.gamma { p.gamma = v; }
    if let Some(v) = a.amplitude { p.amplitude = v; }
    if let Some(v) = a.drive_freq { p.drive_freq = v; }
    if let Some(v) = a.theta0 { p.theta0 = v; }
    if let Some(v) = a.phi0 { p.phi0 = v; }
    if let Some(v) = a.theta_dot0 { p.theta_dot0 = v; }
    if let Some(v) = a.phi_dot0 { p.phi_dot0 = v; }
    if let Some(v) = a.t_max { p.t_max = v; }
    if let Some(v) = a.dt { p.dt = v; }

    p.validate().context("invalid spherical parameters")?;
    Ok(p)
}

// ---------------------------------------------------------------------------
// Console report
// ---------------------------------------------------------------------------

fn print_banner(title: &str) {
    println!();
    println!("====================================================================");
    println!("  {}", title);
    println!("====================================================================");
    println!();
}

fn print_section(title: &str) {
    println!("  {}", title);
    println!("  ──────────────────────────────────────────────────────────────────");
}

fn print_energy(summary: &Summary, conservative: bool) {
    print_section("Energy (per unit mass)");
    println!(
        "  Initial:       {:>12.6} J/kg    Final:     {:>12.6} J/kg",
        summary.initial_energy, summary.final_energy
    );
    println!(
        "  Drift:         {:>12.3e}         Max |theta|: {:>8.4} rad",
        summary.relative_drift, summary.max_abs_theta
    );
    if !conservative {
        println!("  (damping/driving active: energy is not expected to be conserved)");
    }
    println!();

    if !summary.all_finite {
        warn!("Trajectory contains non-finite values; the run diverged");
    }
}

/// Every k-th row so that roughly `rows` lines are printed, plus the last.
fn sampled_rows(len: usize, rows: usize) -> impl Iterator<Item = usize> {
    let interval = (len / rows.max(1)).max(1);
    (0..len).filter(move |&i| i % interval == 0 || i + 1 == len)
}

fn report_planar(p: &PlanarParams, sol: &PlanarSolution, rows: usize) {
    let summary = Summary::from_planar(sol);

    print_banner("PLANAR PENDULUM — RK4");
    print_section("Parameters");
    println!("  g:      {:>8.3} m/s^2    L:      {:>8.3} m", p.g, p.length);
    println!("  theta0: {:>8.3} rad      omega0: {:>8.3} rad/s", p.theta0, p.omega0);
    println!("  gamma:  {:>8.3} 1/s      A:      {:>8.3} rad/s^2   wd: {:.3} rad/s", p.gamma, p.amplitude, p.drive_freq);
    println!("  t_max:  {:>8.3} s        dt:     {:>8.4} s", p.t_max, p.dt);
    println!();

    print_energy(&summary, p.is_conservative());

    print_section("Trajectory");
    println!("  {:>8}  {:>11}  {:>11}  {:>12}", "t (s)", "theta", "omega", "E (J/kg)");
    println!("  {}", "─".repeat(50));
    for i in sampled_rows(sol.len(), rows) {
        println!(
            "  {:>8.3}  {:>11.6}  {:>11.6}  {:>12.6}",
            sol.time[i], sol.theta[i], sol.omega[i], sol.energy[i]
        );
    }
    println!();
    println!("  Simulation: {} samples, dt={} s", sol.len(), p.dt);
    println!("====================================================================");
    println!();
}

fn report_spherical(p: &SphericalParams, sol: &SphericalSolution, rows: usize) {
    let summary = Summary::from_spherical(sol);

    print_banner("SPHERICAL PENDULUM — RK4");
    print_section("Parameters");
    println!("  g:      {:>8.3} m/s^2    L:        {:>8.3} m", p.g, p.length);
    println!("  theta0: {:>8.3} rad      phi0:     {:>8.3} rad", p.theta0, p.phi0);
    println!("  dtheta: {:>8.3} rad/s    dphi:     {:>8.3} rad/s", p.theta_dot0, p.phi_dot0);
    println!("  gamma:  {:>8.3} 1/s      A:        {:>8.3} rad/s^2   wd: {:.3} rad/s", p.gamma, p.amplitude, p.drive_freq);
    println!("  t_max:  {:>8.3} s        dt:       {:>8.4} s", p.t_max, p.dt);
    println!();

    print_energy(&summary, p.is_conservative());

    print_section("Trajectory");
    println!(
        "  {:>8}  {:>9}  {:>9}  {:>8}  {:>8}  {:>8}  {:>10}",
        "t (s)", "theta", "phi", "x (m)", "y (m)", "z (m)", "E (J/kg)"
    );
    println!("  {}", "─".repeat(72));
    for i in sampled_rows(sol.len(), rows) {
        println!(
            "  {:>8.3}  {:>9.4}  {:>9.4}  {:>8.4}  {:>8.4}  {:>8.4}  {:>10.5}",
            sol.time[i], sol.theta[i], sol.phi[i], sol.x[i], sol.y[i], sol.z[i], sol.energy[i]
        );
    }
    println!();
    println!("  Simulation: {} samples, dt={} s", sol.len(), p.dt);
    println!("====================================================================");
    println!();
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

fn export_planar(p: &PlanarParams, sol: &PlanarSolution, out: &OutputArgs) -> Result<()> {
    if let Some(path) = &out.csv {
        csv::write_planar_file(path, sol).context("writing CSV")?;
    }
    if let Some(path) = &out.json {
        json::write_summary_file(path, p, &Summary::from_planar(sol)).context("writing JSON")?;
    }
    if let Some(path) = &out.wav {
        let (x, y) = diagnostics::bob_position_planar(&sol.theta, p.length);
        write_audio(path, &sol.time, &x, &y, out.sample_rate)?;
    }
    Ok(())
}

fn export_spherical(p: &SphericalParams, sol: &SphericalSolution, out: &OutputArgs) -> Result<()> {
    if let Some(path) = &out.csv {
        csv::write_spherical_file(path, sol).context("writing CSV")?;
    }
    if let Some(path) = &out.json {
        json::write_summary_file(path, p, &Summary::from_spherical(sol)).context("writing JSON")?;
    }
    if let Some(path) = &out.wav {
        write_audio(path, &sol.time, &sol.x, &sol.y, out.sample_rate)?;
    }
    Ok(())
}

fn write_audio(path: &PathBuf, t: &[f64], x: &[f64], y: &[f64], sample_rate: u32) -> Result<()> {
    let cfg = SonifyConfig { sample_rate, ..SonifyConfig::default() };
    let buf = sonify::sonify(t, x, y, &cfg);
    if buf.is_empty() {
        bail!("trajectory too short to sonify");
    }
    wav::write_wav_file(path, &buf).context("writing WAV")
}
