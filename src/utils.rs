//! Utility structures and functions.

use average::{Estimate, Variance};
use chrono;
use csv;
use env_logger;
use errors::*;
use serde::Serialize;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Mean of a sample with its error, the population standard deviation.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Measure {
    /// Sample mean.
    pub mean: f64,

    /// Population standard deviation.
    pub err: f64,
}

impl Measure {
    /// The measure of an empty sample.
    pub fn nan() -> Self {
        Measure {
            mean: ::std::f64::NAN,
            err: ::std::f64::NAN,
        }
    }

    /// A value known without error.
    pub fn exact(value: f64) -> Self {
        Measure {
            mean: value,
            err: 0.0,
        }
    }

    /// Streams the samples through a running variance. An empty sample has
    /// no mean, so both fields are NaN.
    pub fn from_samples<I: IntoIterator<Item = f64>>(samples: I) -> Self {
        let mut v = Variance::new();
        let mut count = 0;
        for sample in samples {
            v.add(sample);
            count += 1;
        }
        if count == 0 {
            return Measure::nan();
        }
        Measure {
            mean: v.mean(),
            err: v.population_variance().sqrt(),
        }
    }

    /// Scales mean and error alike, e.g. for a unit change.
    pub fn scale(&self, factor: f64) -> Self {
        Measure {
            mean: self.mean * factor,
            err: self.err * factor,
        }
    }
}

/// Writes rows to a CSV file, header taken from the row type. Missing parent
/// directories are created.
pub fn write_csv<P: AsRef<Path>, S: Serialize>(path: P, rows: &[S]) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).chain_err(|| format!("failed to create {:?}", dir))?;
    }
    let mut writer =
        csv::Writer::from_path(path).chain_err(|| format!("failed to open {:?}", path))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!("wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}

/// Installs the logger used by the binaries. `RUST_LOG` sets the filter. A
/// second call keeps the logger already installed.
pub fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder.format(|buf, record| {
        let t = chrono::Utc::now();
        writeln!(
            buf,
            "{} {} {}",
            t.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    });
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if builder.try_init().is_err() {
        debug!("logger already installed, keeping it");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_error() {
        let m = Measure::from_samples(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((m.mean - 5.0).abs() < 1e-12);
        assert!((m.err - 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_sample_has_no_error() {
        let m = Measure::from_samples(vec![42.0]);
        assert_eq!(m, Measure::exact(42.0));
    }

    #[test]
    fn empty_sample_is_nan() {
        let m = Measure::from_samples(Vec::new());
        assert!(m.mean.is_nan());
        assert!(m.err.is_nan());
    }

    #[test]
    fn csv_header_from_fields() {
        let dir = ::tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &[Measure::exact(1.5), Measure { mean: 2.0, err: 0.25 }]).unwrap();
        let written = ::std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "mean,err\n1.5,0.0\n2.0,0.25\n");
    }

    #[test]
    fn csv_into_new_directory() {
        let dir = ::tempfile::tempdir().unwrap();
        let path = dir.path().join("plots").join("nested").join("out.csv");
        write_csv(&path, &[Measure::exact(3.0)]).unwrap();
        let written = ::std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "mean,err\n3.0,0.0\n");
    }

    #[test]
    fn logger_installs_once() {
        init_logger();
        init_logger();
        info!("logger still usable");
    }

    #[test]
    fn scale_both() {
        let m = Measure { mean: 2.0e6, err: 5.0e5 }.scale(1e-6);
        assert!((m.mean - 2.0).abs() < 1e-12);
        assert!((m.err - 0.5).abs() < 1e-12);
    }
}
