//! Parallel efficiency grouped by how much of the matrix each processing
//! element holds.
//!
//! Grids of different sizes solving different problems end up with the same
//! submatrix side per processing element; trials that share it are expected
//! to share their compute ratio too.

use errors::*;
use rayon::prelude::*;
use run::RunConfig;
use setting::Setting;
use std::collections::BTreeMap;
use std::path::PathBuf;
use trial::TrialSet;
use utils::{self, Measure};

/// The compute ratio of one trial.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct EfficiencyPoint {
    /// Grid size.
    pub p: usize,

    /// Submatrix side per processing element, `ceil(n / p)`.
    pub submatrix: usize,

    /// Fraction of the trial's total time spent computing.
    pub ratio: f64,
}

/// All trials sharing a submatrix size.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct EfficiencyBucket {
    /// Submatrix side per processing element.
    pub submatrix: usize,

    /// Mean compute ratio.
    pub mean: f64,

    /// Population standard deviation of the compute ratio.
    pub err: f64,

    /// Number of trials in the bucket.
    pub count: usize,
}

fn run_points(setting: &Setting, rc: &RunConfig) -> Result<Vec<EfficiencyPoint>> {
    let n = match setting.problem_size_of(rc) {
        Some(n) => n,
        None => bail!(ErrorKind::InvalidSetting(format!(
            "no problem size for {}",
            rc
        ))),
    };
    let submatrix = rc.submatrix_size(n);
    let set = TrialSet::load(&rc.derive_prefix(&setting.base))?;

    Ok(set.summaries()
        .iter()
        .map(|s| {
            EfficiencyPoint {
                p: rc.p,
                submatrix: submatrix,
                ratio: s.ratio(),
            }
        })
        .collect())
}

/// One point per trial of every grid run in the setting, in the order of
/// `configurations`.
pub fn efficiency_points(setting: &Setting) -> Result<Vec<EfficiencyPoint>> {
    let per_run = setting
        .configurations()
        .par_iter()
        .map(|rc| run_points(setting, rc))
        .collect::<Result<Vec<_>>>()?;
    Ok(per_run.into_iter().flat_map(|p| p).collect())
}

/// Groups points by submatrix size, ascending.
pub fn bucket_means(points: &[EfficiencyPoint]) -> Vec<EfficiencyBucket> {
    let mut buckets = BTreeMap::new();
    for point in points {
        buckets
            .entry(point.submatrix)
            .or_insert_with(Vec::new)
            .push(point.ratio);
    }

    buckets
        .into_iter()
        .map(|(submatrix, ratios)| {
            let m = Measure::from_samples(ratios.iter().cloned());
            EfficiencyBucket {
                submatrix: submatrix,
                mean: m.mean,
                err: m.err,
                count: ratios.len(),
            }
        })
        .collect()
}

/// Writes `bucket-points.csv` and `bucket-means.csv` to the output directory
/// and returns both paths.
pub fn summarize_buckets(setting: &Setting) -> Result<(PathBuf, PathBuf)> {
    let points = efficiency_points(setting)?;
    let buckets = bucket_means(&points);

    let points_path = setting.output_file("bucket-points.csv");
    let means_path = setting.output_file("bucket-means.csv");
    utils::write_csv(&points_path, &points)?;
    utils::write_csv(&means_path, &buckets)?;
    info!(
        "bucketed {} trials into {} submatrix sizes",
        points.len(),
        buckets.len()
    );
    Ok((points_path, means_path))
}
