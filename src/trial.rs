//! Locating and loading the repeated trials of one run.
//!
//! Trials of a run share a prefix and are numbered from zero:
//!
//! ```ignore
//! timing-data/cal-random-n-20-p-4.0.csv
//! timing-data/cal-random-n-20-p-4.1.csv
//! timing-data/cal-random-n-20-p-4.2.csv
//! ```
//!
//! Numbering must be contiguous; the first gap ends the run.

use errors::*;
use record;
use stall::{self, StalledTrialRecord};
use std::path::{Path, PathBuf};

/// Upper bound of the trial index scan.
pub const MAX_TRIALS: usize = 9999;

/// Gets the filename of the `index`-th trial of `prefix`.
pub fn trial_file(prefix: &str, index: usize) -> PathBuf {
    PathBuf::from(format!("{}.{}.csv", prefix, index))
}

/// Returns the trial files of `prefix` in index order, stopping at the first
/// index without a file.
pub fn discover_trials(prefix: &str) -> Vec<PathBuf> {
    let files = (0..MAX_TRIALS)
        .map(|i| trial_file(prefix, i))
        .take_while(|path| path.is_file())
        .collect::<Vec<_>>();
    debug!("found {} trials for {}", files.len(), prefix);
    files
}

/// Per-trial totals, summed over all processing elements.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct TrialSummary {
    /// Trial index within the run.
    pub index: usize,

    /// Summed computation time.
    pub computation_time: f64,

    /// Summed communication time, stalls included.
    pub communication_time: f64,

    /// Time at which the last processing element finishes.
    pub finish_time: f64,
}

impl TrialSummary {
    /// Computation plus communication.
    #[inline]
    pub fn total_time(&self) -> f64 {
        self.computation_time + self.communication_time
    }

    /// Fraction of the total time spent computing.
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.computation_time / self.total_time()
    }
}

/// One stall-corrected trial.
#[derive(Debug, Clone)]
pub struct Trial {
    /// Index in the file name.
    pub index: usize,

    /// Where it was loaded from.
    pub path: PathBuf,

    /// One record per processing element.
    pub records: Vec<StalledTrialRecord>,
}

impl Trial {
    /// Loads a trial file and applies the stall correction.
    pub fn load<P: AsRef<Path>>(index: usize, path: P) -> Result<Trial> {
        let path = path.as_ref();
        let records = record::load_trial_file(path)?;
        Ok(Trial {
            index: index,
            path: path.to_path_buf(),
            records: stall::stall_until_last_finished(&records),
        })
    }

    /// Sums the trial over its processing elements.
    pub fn summary(&self) -> TrialSummary {
        let computation_time: f64 = self.records.iter().map(|r| r.computation_time()).sum();
        let communication_time: f64 = self.records
            .iter()
            .map(|r| r.total_communication_time())
            .sum();
        let finish_time = self.records
            .iter()
            .map(|r| r.finish_time)
            .fold(::std::f64::NEG_INFINITY, f64::max);

        TrialSummary {
            index: self.index,
            computation_time: computation_time,
            communication_time: communication_time,
            finish_time: finish_time,
        }
    }
}

/// All trials of one run, in index order.
#[derive(Debug, Clone)]
pub struct TrialSet {
    /// The run prefix, without trial index and extension.
    pub prefix: String,

    /// Trials `0..len()`.
    pub trials: Vec<Trial>,
}

impl TrialSet {
    /// Discovers and loads every trial of `prefix`. An empty set is not an
    /// error; a malformed file is.
    pub fn load(prefix: &str) -> Result<TrialSet> {
        let trials = discover_trials(prefix)
            .into_iter()
            .enumerate()
            .map(|(i, path)| Trial::load(i, path))
            .collect::<Result<Vec<_>>>()?;

        Ok(TrialSet {
            prefix: prefix.to_string(),
            trials: trials,
        })
    }

    /// Number of trials.
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    /// Whether no trial was found.
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Per-trial totals, in index order.
    pub fn summaries(&self) -> Vec<TrialSummary> {
        self.trials.iter().map(|t| t.summary()).collect()
    }
}
