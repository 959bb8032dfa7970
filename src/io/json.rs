use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::diagnostics::Summary;
use crate::error::Result;

/// Parameters and headline diagnostics of one run, as written to disk.
#[derive(Debug, Serialize)]
pub struct Report<'a, P: Serialize> {
    pub parameters: &'a P,
    pub summary: &'a Summary,
}

/// Write a run report as pretty-printed JSON.
pub fn write_summary<W: Write, P: Serialize>(writer: &mut W, params: &P, summary: &Summary) -> Result<()> {
    let report = Report { parameters: params, summary };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a run report to a JSON file.
pub fn write_summary_file<P: Serialize>(path: impl AsRef<Path>, params: &P, summary: &Summary) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, params, summary)?;
    info!(path = %path.display(), "Wrote summary JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::params::{presets, PlanarParams};
    use crate::sim::runner::{simulate_planar, simulate_spherical};

    #[test]
    fn report_contains_parameters_and_summary() {
        let p = PlanarParams::default();
        let summary = Summary::from_planar(&simulate_planar(&p));

        let mut buf: Vec<u8> = Vec::new();
        write_summary(&mut buf, &p, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["parameters"]["theta0"], 0.6);
        assert_eq!(value["summary"]["model"], "planar");
        assert_eq!(value["summary"]["samples"], 1001);
        assert_eq!(value["summary"]["all_finite"], true);
    }

    #[test]
    fn spherical_report_round_trips_parameters() {
        let p = presets::rosette();
        let summary = Summary::from_spherical(&simulate_spherical(&p));

        let mut buf: Vec<u8> = Vec::new();
        write_summary(&mut buf, &p, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let back: crate::dynamics::params::SphericalParams =
            serde_json::from_value(value["parameters"].clone()).unwrap();
        assert_eq!(back, p);
    }
}
