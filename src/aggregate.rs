//! Cross-trial aggregation of one run.
//!
//! All times are summed over the processing elements of a trial first; the
//! mean and error are then taken across trials. Errors are population
//! standard deviations, so a run with a single trial has no error.

use errors::*;
use record;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use trial::{self, TrialSet, TrialSummary};
use utils::Measure;

/// Selects how a run is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// A grid of processing elements: stall-corrected, communication counted.
    Parallel,

    /// The single-element baseline: only computation is read.
    Serial,
}

/// Summary of all trials of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggregateResult {
    /// Number of trials aggregated.
    pub trials: usize,

    /// Summed computation time.
    pub computation: Measure,

    /// Summed communication time, stalls included.
    pub communication: Measure,

    /// Computation plus communication. The mean is the sum of both means; the
    /// error comes from the per-trial totals.
    pub total: Measure,

    /// Per-trial `computation / total`. The ratio of two random sums is only
    /// approximately normal, so mean and error here are estimates taken
    /// directly over the per-trial ratios.
    pub ratio: Measure,

    /// Time at which the last processing element finishes.
    pub finish: Measure,
}

impl AggregateResult {
    /// Aggregates stall-corrected per-trial totals. No trial gives NaN
    /// everywhere.
    pub fn from_summaries(summaries: &[TrialSummary]) -> AggregateResult {
        let computation = Measure::from_samples(summaries.iter().map(|s| s.computation_time));
        let communication =
            Measure::from_samples(summaries.iter().map(|s| s.communication_time));
        let total = Measure {
            mean: computation.mean + communication.mean,
            err: Measure::from_samples(summaries.iter().map(|s| s.total_time())).err,
        };

        AggregateResult {
            trials: summaries.len(),
            computation: computation,
            communication: communication,
            total: total,
            ratio: Measure::from_samples(summaries.iter().map(|s| s.ratio())),
            finish: Measure::from_samples(summaries.iter().map(|s| s.finish_time)),
        }
    }

    /// Aggregates a sequential run from all of its computation samples. All
    /// time is computation, so the ratio is exactly one.
    pub fn from_serial_samples(trials: usize, samples: &[f64]) -> AggregateResult {
        let computation = Measure::from_samples(samples.iter().cloned());
        AggregateResult {
            trials: trials,
            computation: computation,
            communication: Measure::exact(0.0),
            total: computation,
            ratio: Measure::exact(1.0),
            finish: computation,
        }
    }

    /// Reads one metric, times converted to milliseconds.
    pub fn metric(&self, metric: Metric) -> Measure {
        match metric {
            Metric::FinishTime => self.finish.scale(NS_TO_MS),
            Metric::TotalTime => self.total.scale(NS_TO_MS),
            Metric::ComputationTime => self.computation.scale(NS_TO_MS),
            Metric::CommunicationTime => self.communication.scale(NS_TO_MS),
            Metric::Ratio => self.ratio,
        }
    }

    /// Field name and value pairs, in a stable order.
    pub fn fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("computation_time", self.computation.mean),
            ("computation_err", self.computation.err),
            ("communication_time", self.communication.mean),
            ("communication_err", self.communication.err),
            ("total_time", self.total.mean),
            ("total_time_err", self.total.err),
            ("ratio", self.ratio.mean),
            ("ratio_err", self.ratio.err),
            ("finish_time", self.finish.mean),
            ("finish_time_err", self.finish.err),
        ]
    }

    /// The aggregate as a name to value mapping.
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        self.fields().into_iter().collect()
    }
}

const NS_TO_MS: f64 = 1e-6;

/// A quantity that reports plot against problem or grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Finish time of the grid (ms).
    FinishTime,
    /// Summed total time (ms).
    TotalTime,
    /// Summed computation time (ms).
    ComputationTime,
    /// Summed communication time (ms).
    CommunicationTime,
    /// Fraction of time spent computing, the parallel efficiency proxy.
    Ratio,
}

impl Metric {
    /// Name used on the command line and in output file names.
    pub fn name(&self) -> &'static str {
        match *self {
            Metric::FinishTime => "finish_time",
            Metric::TotalTime => "total_time",
            Metric::ComputationTime => "computation_time",
            Metric::CommunicationTime => "communication_time",
            Metric::Ratio => "ratio",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Metric> {
        match s {
            "finish_time" => Ok(Metric::FinishTime),
            "total_time" => Ok(Metric::TotalTime),
            "computation_time" => Ok(Metric::ComputationTime),
            "communication_time" => Ok(Metric::CommunicationTime),
            "ratio" => Ok(Metric::Ratio),
            _ => bail!(ErrorKind::UnknownMetric(s.to_string())),
        }
    }
}

/// Aggregates every trial of a grid run. Returns the stall-corrected trials
/// alongside the result. Finding no trial is not an error; the result is NaN.
pub fn aggregate_parallel(prefix: &str) -> Result<(AggregateResult, TrialSet)> {
    let set = TrialSet::load(prefix)?;
    if set.is_empty() {
        warn!("no trial found for {}", prefix);
    }
    let result = AggregateResult::from_summaries(&set.summaries());
    info!("aggregated {} trials of {}", result.trials, prefix);
    Ok((result, set))
}

/// Aggregates every trial of a sequential run. Every row of every trial is
/// one computation sample. Unlike the grid case, finding no trial is an
/// error.
pub fn aggregate_serial(prefix: &str) -> Result<AggregateResult> {
    let files = trial::discover_trials(prefix);
    if files.is_empty() {
        bail!(ErrorKind::NoTrials(prefix.to_string()));
    }

    let mut samples = Vec::new();
    for file in &files {
        samples.extend(record::load_computation_file(file)?);
    }
    let result = AggregateResult::from_serial_samples(files.len(), &samples);
    info!("aggregated {} sequential trials of {}", result.trials, prefix);
    Ok(result)
}

/// Aggregates the run at `prefix` the way `unit` demands.
pub fn aggregate(prefix: &str, unit: Unit) -> Result<AggregateResult> {
    match unit {
        Unit::Parallel => aggregate_parallel(prefix).map(|(result, _)| result),
        Unit::Serial => aggregate_serial(prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record::TrialRecord;
    use stall::stall_until_last_finished;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;
    use trial::{trial_file, Trial};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn summary_of(index: usize, records: &[TrialRecord]) -> TrialSummary {
        Trial {
            index: index,
            path: Path::new("inline").to_path_buf(),
            records: stall_until_last_finished(records),
        }.summary()
    }

    fn two_trials() -> Vec<TrialSummary> {
        vec![
            summary_of(0, &[TrialRecord::new(10.0, 2.0), TrialRecord::new(8.0, 5.0)]),
            summary_of(1, &[TrialRecord::new(10.0, 1.0), TrialRecord::new(9.0, 4.0)]),
        ]
    }

    #[test]
    fn two_trial_example() {
        let summaries = two_trials();
        assert_eq!(summaries[0].computation_time, 18.0);
        assert_eq!(summaries[0].communication_time, 8.0);
        assert_eq!(summaries[1].computation_time, 19.0);
        assert_eq!(summaries[1].communication_time, 7.0);

        let r = AggregateResult::from_summaries(&summaries);
        assert_eq!(r.trials, 2);
        assert!(close(r.computation.mean, 18.5));
        assert!(close(r.computation.err, 0.5));
        assert!(close(r.communication.mean, 7.5));
        assert!(close(r.communication.err, 0.5));
        assert!(close(r.total.mean, 26.0));
        assert!(close(r.total.err, 0.0));
        assert!(close(r.finish.mean, 13.0));
        assert!(close(r.finish.err, 0.0));
        assert!(close(r.ratio.mean, 18.5 / 26.0));
        assert!(close(r.ratio.err, 0.5 / 26.0));
    }

    #[test]
    fn single_trial_has_no_error() {
        let summaries = vec![summary_of(0, &[TrialRecord::new(3.0, 1.0), TrialRecord::new(2.0, 4.0)])];
        let r = AggregateResult::from_summaries(&summaries);
        for m in &[r.computation, r.communication, r.total, r.ratio, r.finish] {
            assert_eq!(m.err, 0.0);
        }
        assert_eq!(r.finish.mean, 6.0);
    }

    #[test]
    fn no_trial_is_nan() {
        let r = AggregateResult::from_summaries(&[]);
        assert_eq!(r.trials, 0);
        assert!(r.fields().iter().all(|&(_, v)| v.is_nan()));
    }

    #[test]
    fn map_has_every_field() {
        let map = AggregateResult::from_summaries(&two_trials()).to_map();
        assert_eq!(map.len(), 10);
        assert!(close(map["computation_time"], 18.5));
        assert!(close(map["finish_time_err"], 0.0));
        assert!(close(map["ratio"], 18.5 / 26.0));
    }

    #[test]
    fn metric_in_milliseconds() {
        let r = AggregateResult::from_serial_samples(1, &[2.5e6]);
        assert!(close(r.metric(Metric::FinishTime).mean, 2.5));
        assert_eq!(r.metric(Metric::Ratio), Measure::exact(1.0));
        assert_eq!("ratio".parse::<Metric>().unwrap(), Metric::Ratio);
        assert_eq!(Metric::CommunicationTime.to_string(), "communication_time");
        assert!("speedup".parse::<Metric>().is_err());
    }

    #[test]
    fn parallel_from_files() {
        let dir = tempdir().unwrap();
        let prefix = dir.path().join("run-n-20-p-2").display().to_string();
        let data = [
            "computation_time,total_communication_time\n10,2\n8,5\n",
            "computation_time,total_communication_time\n10,1\n9,4\n",
        ];
        for (i, d) in data.iter().enumerate() {
            fs::write(trial_file(&prefix, i), d).unwrap();
        }
        // past the gap, never read
        fs::write(trial_file(&prefix, 3), "garbage").unwrap();

        let (result, set) = aggregate_parallel(&prefix).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.trials.iter().all(|t| t.records.iter().all(|r| r.finish_time == 13.0)));
        assert_eq!(result, AggregateResult::from_summaries(&two_trials()));
        assert_eq!(aggregate(&prefix, Unit::Parallel).unwrap(), result);
    }

    #[test]
    fn parallel_without_files_is_nan() {
        let dir = tempdir().unwrap();
        let prefix = dir.path().join("missing").display().to_string();
        let r = aggregate(&prefix, Unit::Parallel).unwrap();
        assert_eq!(r.trials, 0);
        assert!(r.ratio.mean.is_nan());
    }

    #[test]
    fn serial_constant_trial() {
        let dir = tempdir().unwrap();
        let prefix = dir.path().join("run-n-20-p-1").display().to_string();
        fs::write(trial_file(&prefix, 0), "computation_time\n5\n5\n5\n").unwrap();

        let r = aggregate(&prefix, Unit::Serial).unwrap();
        assert_eq!(r.trials, 1);
        assert_eq!(r.computation, Measure::exact(5.0));
        assert_eq!(r.finish, Measure::exact(5.0));
        assert_eq!(r.ratio.mean, 1.0);
        assert_eq!(r.ratio.err, 0.0);
    }

    #[test]
    fn serial_across_trials() {
        let dir = tempdir().unwrap();
        let prefix = dir.path().join("run").display().to_string();
        fs::write(trial_file(&prefix, 0), "computation_time,total_communication_time\n4,0\n").unwrap();
        fs::write(trial_file(&prefix, 1), "computation_time,total_communication_time\n6,0\n").unwrap();

        let r = aggregate_serial(&prefix).unwrap();
        assert_eq!(r.trials, 2);
        assert!(close(r.computation.mean, 5.0));
        assert!(close(r.computation.err, 1.0));
        assert_eq!(r.communication, Measure::exact(0.0));
    }

    #[test]
    fn serial_without_files_fails() {
        let dir = tempdir().unwrap();
        let prefix = dir.path().join("missing").display().to_string();
        match aggregate(&prefix, Unit::Serial) {
            Err(Error(ErrorKind::NoTrials(p), _)) => assert_eq!(p, prefix),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
