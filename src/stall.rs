//! Barrier stall correction.
//!
//! Every iteration of the squaring ends in a barrier, so no processing element
//! finishes before the slowest one does. The time a processing element waits
//! at the barrier is spent neither computing nor sending; we count it as
//! communication.

use record::TrialRecord;

/// A `TrialRecord` after stall correction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StalledTrialRecord {
    /// The record with `total_communication_time` already corrected.
    pub record: TrialRecord,

    /// Time at which the whole grid finishes. Shared by every element of the
    /// trial.
    pub finish_time: f64,
}

impl StalledTrialRecord {
    /// Time spent computing.
    #[inline]
    pub fn computation_time(&self) -> f64 {
        self.record.computation_time
    }

    /// Communication time including the wait for the slowest element.
    #[inline]
    pub fn total_communication_time(&self) -> f64 {
        self.record.total_communication_time
    }
}

/// Returns the records of one trial with every processing element stalled
/// until the last one has finished.
///
/// The finish time of every returned element is exactly the largest
/// `computation_time + total_communication_time` of the input, and no
/// communication time decreases. The input is expected to be non-empty.
pub fn stall_until_last_finished(records: &[TrialRecord]) -> Vec<StalledTrialRecord> {
    let finish_time = records
        .iter()
        .map(|r| r.naive_finish_time())
        .fold(::std::f64::NEG_INFINITY, f64::max);

    records
        .iter()
        .map(|r| {
            let mut record = *r;
            record.total_communication_time += finish_time - r.naive_finish_time();
            StalledTrialRecord {
                record: record,
                finish_time: finish_time,
            }
        })
        .collect()
}
