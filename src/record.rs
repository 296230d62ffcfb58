//! Per-processing-element timing records, as written by the benchmark.

use csv;
use errors::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of a trial file: what a single processing element spent computing
/// and communicating, in nanoseconds. The benchmark writes
///
/// ```ignore
/// n,computation_time,send_time,stall_time,total_communication_time
/// 20,10500.000000,800.000000,120.000000,920.000000
/// 20,9800.000000,950.000000,40.000000,990.000000
/// ```
///
/// Only `computation_time` and `total_communication_time` are required.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TrialRecord {
    /// Problem size (number of vertices), when the file records it.
    #[serde(default)]
    pub n: Option<usize>,

    /// Time spent computing.
    pub computation_time: f64,

    /// Time spent sending, when recorded.
    #[serde(default)]
    pub send_time: Option<f64>,

    /// Time spent stalled on the interconnect, when recorded.
    #[serde(default)]
    pub stall_time: Option<f64>,

    /// Send plus stall time.
    pub total_communication_time: f64,
}

impl TrialRecord {
    /// Creates a record with only the two required columns.
    pub fn new(computation_time: f64, total_communication_time: f64) -> Self {
        TrialRecord {
            n: None,
            computation_time: computation_time,
            send_time: None,
            stall_time: None,
            total_communication_time: total_communication_time,
        }
    }

    /// Finish time ignoring every other processing element.
    #[inline]
    pub fn naive_finish_time(&self) -> f64 {
        self.computation_time + self.total_communication_time
    }
}

/// The sequential baseline only has a computation column that matters.
#[derive(Deserialize)]
struct ComputationRecord {
    computation_time: f64,
}

/// A time is usable when it is a finite, non-negative number. NaN fails
/// every comparison, so it is rejected explicitly.
#[inline]
fn valid_time(t: f64) -> bool {
    t.is_finite() && t >= 0.0
}

/// Takes a reader (file, string, etc.) and returns the records of one trial.
/// `source` names the input in error messages.
pub fn load_trial<R: Read>(rdr: R, source: &str) -> Result<Vec<TrialRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut records = Vec::new();
    for (row, record) in reader.deserialize::<TrialRecord>().enumerate() {
        let record: TrialRecord =
            record.chain_err(|| format!("malformed trial file '{}'", source))?;
        if !valid_time(record.computation_time) || !valid_time(record.total_communication_time) {
            bail!(ErrorKind::NegativeTime(source.to_string(), row + 1));
        }
        records.push(record);
    }

    if records.is_empty() {
        bail!(ErrorKind::EmptyTrial(source.to_string()));
    }
    trace!("loaded {} processing elements from {}", records.len(), source);
    Ok(records)
}

/// Opens and loads one trial file.
pub fn load_trial_file<P: AsRef<Path>>(path: P) -> Result<Vec<TrialRecord>> {
    let path = path.as_ref();
    let file = File::open(path).chain_err(|| format!("no trial file {:?}", path))?;
    load_trial(file, &path.display().to_string())
}

/// Reads only the `computation_time` column of one trial.
pub fn load_computation_times<R: Read>(rdr: R, source: &str) -> Result<Vec<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut times = Vec::new();
    for (row, record) in reader.deserialize::<ComputationRecord>().enumerate() {
        let record: ComputationRecord =
            record.chain_err(|| format!("malformed trial file '{}'", source))?;
        if !valid_time(record.computation_time) {
            bail!(ErrorKind::NegativeTime(source.to_string(), row + 1));
        }
        times.push(record.computation_time);
    }

    if times.is_empty() {
        bail!(ErrorKind::EmptyTrial(source.to_string()));
    }
    Ok(times)
}

/// Opens a trial file and reads its computation times.
pub fn load_computation_file<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let file = File::open(path).chain_err(|| format!("no trial file {:?}", path))?;
    load_computation_times(file, &path.display().to_string())
}
