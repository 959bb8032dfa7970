use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{PendulumError, Result};
use crate::sim::solution::{PlanarSolution, SphericalSolution};

/// Write a planar trajectory as CSV.
///
/// Columns: time, theta, omega, energy
pub fn write_planar<W: Write>(writer: &mut W, sol: &PlanarSolution) -> Result<()> {
    if sol.is_empty() {
        return Err(PendulumError::EmptyTrajectory);
    }

    writeln!(writer, "time,theta,omega,energy")?;
    for i in 0..sol.len() {
        writeln!(
            writer,
            "{:.6},{:.9},{:.9},{:.9}",
            sol.time[i], sol.theta[i], sol.omega[i], sol.energy[i],
        )?;
    }
    Ok(())
}

/// Write a spherical trajectory as CSV.
///
/// Columns: time, theta, phi, theta_dot, phi_dot, x, y, z, energy
pub fn write_spherical<W: Write>(writer: &mut W, sol: &SphericalSolution) -> Result<()> {
    if sol.is_empty() {
        return Err(PendulumError::EmptyTrajectory);
    }

    writeln!(writer, "time,theta,phi,theta_dot,phi_dot,x,y,z,energy")?;
    for i in 0..sol.len() {
        writeln!(
            writer,
            "{:.6},{:.9},{:.9},{:.9},{:.9},{:.9},{:.9},{:.9},{:.9}",
            sol.time[i],
            sol.theta[i], sol.phi[i],
            sol.theta_dot[i], sol.phi_dot[i],
            sol.x[i], sol.y[i], sol.z[i],
            sol.energy[i],
        )?;
    }
    Ok(())
}

/// Write a planar trajectory to a CSV file at the given path.
pub fn write_planar_file(path: impl AsRef<Path>, sol: &PlanarSolution) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_planar(&mut file, sol)?;
    file.flush()?;
    info!(path = %path.display(), rows = sol.len(), "Wrote trajectory CSV");
    Ok(())
}

/// Write a spherical trajectory to a CSV file at the given path.
pub fn write_spherical_file(path: impl AsRef<Path>, sol: &SphericalSolution) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_spherical(&mut file, sol)?;
    file.flush()?;
    info!(path = %path.display(), rows = sol.len(), "Wrote trajectory CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::params::{PlanarParamsBuilder, SphericalParamsBuilder};
    use crate::sim::runner::{simulate_planar, simulate_spherical};

    #[test]
    fn planar_csv_has_header_and_rows() {
        let sol = simulate_planar(&PlanarParamsBuilder::new().t_max(1.0).dt(0.5).build());

        let mut buf: Vec<u8> = Vec::new();
        write_planar(&mut buf, &sol).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "time,theta,omega,energy");
        assert_eq!(lines.len(), 4); // header + 3 data rows
        assert!(lines[1].starts_with("0.000000,0.600000000,0.000000000,"));
        assert!(lines[3].starts_with("1.000000,"));
    }

    #[test]
    fn spherical_csv_has_nine_columns() {
        let sol = simulate_spherical(&SphericalParamsBuilder::new().t_max(0.1).dt(0.05).build());

        let mut buf: Vec<u8> = Vec::new();
        write_spherical(&mut buf, &sol).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert_eq!(output.lines().count(), 4);
        for line in output.lines() {
            assert_eq!(line.split(',').count(), 9, "Bad row: {}", line);
        }
    }

    #[test]
    fn empty_solution_is_rejected() {
        let sol = PlanarSolution {
            time: vec![],
            theta: vec![],
            omega: vec![],
            energy: vec![],
        };
        let err = write_planar(&mut Vec::<u8>::new(), &sol).unwrap_err();
        assert!(matches!(err, PendulumError::EmptyTrajectory));
    }
}
