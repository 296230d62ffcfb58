//! Scaling series: one metric across problem sizes, one series per grid size
//! plus the sequential baseline.

use aggregate::{self, Metric, Unit};
use errors::*;
use rayon::prelude::*;
use run::RunConfig;
use setting::Setting;
use std::path::PathBuf;
use utils::{self, Measure};

/// A point of a scaling series.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ScalingPoint {
    /// Series label, e.g. `4x4` or `sequential`.
    pub series: String,

    /// Grid size.
    pub p: usize,

    /// Problem size, empty for fixed-graph runs.
    pub n: Option<usize>,

    /// Mean of the metric.
    pub value: f64,

    /// Error of the metric.
    pub err: f64,
}

impl ScalingPoint {
    fn new(rc: &RunConfig, m: Measure) -> Self {
        ScalingPoint {
            series: rc.to_string(),
            p: rc.p,
            n: rc.n,
            value: m.mean,
            err: m.err,
        }
    }
}

fn sweep(
    base: &str,
    configs: &[RunConfig],
    unit: Unit,
    metric: Metric,
) -> Result<Vec<ScalingPoint>> {
    configs
        .par_iter()
        .map(|rc| -> Result<ScalingPoint> {
            let prefix = rc.derive_prefix(base);
            let result = aggregate::aggregate(&prefix, unit)
                .chain_err(|| format!("failed to aggregate {}", prefix))?;
            Ok(ScalingPoint::new(rc, result.metric(metric)))
        })
        .collect()
}

/// Aggregates every run of the setting and reads `metric` off each. Grid
/// series come first, in the order of `ps`, then the sequential series.
pub fn scaling(setting: &Setting, metric: Metric) -> Result<Vec<ScalingPoint>> {
    let mut points = sweep(&setting.base, &setting.configurations(), Unit::Parallel, metric)?;
    if setting.sequential {
        let serial = sweep(
            setting.serial_base(),
            &setting.serial_configurations(),
            Unit::Serial,
            metric,
        )?;
        points.extend(serial);
    }
    Ok(points)
}

/// Computes the scaling series and writes `scaling-{metric}.csv` to the
/// output directory. Returns the written path.
pub fn summarize_scaling(setting: &Setting, metric: Metric) -> Result<PathBuf> {
    let points = scaling(setting, metric)?;
    let path = setting.output_file(&format!("scaling-{}.csv", metric));
    utils::write_csv(&path, &points)?;
    info!("wrote {} {} points to {:?}", points.len(), metric, path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;
    use trial::trial_file;

    fn write(dir: &Path, rc: RunConfig, index: usize, data: &str) {
        let prefix = rc.derive_prefix(&dir.join("run").display().to_string());
        fs::write(trial_file(&prefix, index), data).unwrap();
    }

    fn setting_for(dir: &Path, sequential: bool) -> Setting {
        Setting {
            base: dir.join("run").display().to_string(),
            serial_base: None,
            ns: vec![10, 20],
            ps: vec![2],
            problem_size: None,
            sequential: sequential,
            output_dir: dir.display().to_string(),
        }
    }

    #[test]
    fn grid_then_sequential() {
        let dir = tempdir().unwrap();
        let grid = "computation_time,total_communication_time\n3e6,1e6\n1e6,1e6\n";
        write(dir.path(), RunConfig::new(10, 2), 0, grid);
        write(dir.path(), RunConfig::new(20, 2), 0, grid);
        write(dir.path(), RunConfig::new(10, 1), 0, "computation_time\n5e6\n");
        write(dir.path(), RunConfig::new(20, 1), 0, "computation_time\n7e6\n");

        let points = scaling(&setting_for(dir.path(), true), Metric::FinishTime).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].series, "2x2");
        assert_eq!(points[0].n, Some(10));
        assert!((points[0].value - 4.0).abs() < 1e-9);
        assert_eq!(points[1].n, Some(20));
        assert_eq!(points[2].series, "sequential");
        assert_eq!(points[2].p, 1);
        assert!((points[3].value - 7.0).abs() < 1e-9);
        assert_eq!(points[3].err, 0.0);
    }

    #[test]
    fn missing_grid_run_is_nan() {
        let dir = tempdir().unwrap();
        write(dir.path(), RunConfig::new(10, 2), 0, "computation_time,total_communication_time\n1,1\n");

        let points = scaling(&setting_for(dir.path(), false), Metric::Ratio).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, 0.5);
        assert!(points[1].value.is_nan());
    }

    #[test]
    fn missing_sequential_run_fails() {
        let dir = tempdir().unwrap();
        assert!(scaling(&setting_for(dir.path(), true), Metric::Ratio).is_err());
    }

    #[test]
    fn writes_named_csv() {
        let dir = tempdir().unwrap();
        write(dir.path(), RunConfig::new(10, 2), 0, "computation_time,total_communication_time\n1,1\n");
        write(dir.path(), RunConfig::new(20, 2), 0, "computation_time,total_communication_time\n3,1\n");

        let path = summarize_scaling(&setting_for(dir.path(), false), Metric::Ratio).unwrap();
        assert_eq!(path, dir.path().join("scaling-ratio.csv"));
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "series,p,n,value,err\n2x2,2,10,0.5,0.0\n2x2,2,20,0.75,0.0\n");
    }

    #[test]
    fn creates_output_dir() {
        let dir = tempdir().unwrap();
        write(dir.path(), RunConfig::new(10, 2), 0, "computation_time,total_communication_time\n1,1\n");
        write(dir.path(), RunConfig::new(20, 2), 0, "computation_time,total_communication_time\n3,1\n");

        let mut setting = setting_for(dir.path(), false);
        setting.output_dir = dir.path().join("plots").display().to_string();
        let path = summarize_scaling(&setting, Metric::Ratio).unwrap();
        assert_eq!(path, dir.path().join("plots").join("scaling-ratio.csv"));
        assert!(path.is_file());
    }
}
