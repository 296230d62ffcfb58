//! Library of functions and structs to evaluate the timing logs of the
//! parallel all-pairs shortest path benchmark.
//!
//! Each benchmark run on a `p × p` grid of processing elements is repeated a
//! few times; every repetition (trial) writes one CSV row per processing
//! element. This crate finds the trials of a run, corrects them for barrier
//! stalls and reports mean and error across trials.

#![deny(missing_docs)]

extern crate average;
extern crate chrono;
extern crate csv;
extern crate env_logger;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
extern crate rayon;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate toml;

#[cfg(test)]
#[macro_use]
extern crate proptest;
#[cfg(test)]
extern crate tempfile;

pub mod errors;

mod record;
pub use record::TrialRecord;
pub use record::load_computation_file;
pub use record::load_computation_times;
pub use record::load_trial;
pub use record::load_trial_file;

mod stall;
pub use stall::StalledTrialRecord;
pub use stall::stall_until_last_finished;

mod trial;
pub use trial::MAX_TRIALS;
pub use trial::Trial;
pub use trial::TrialSet;
pub use trial::TrialSummary;
pub use trial::discover_trials;
pub use trial::trial_file;

mod aggregate;
pub use aggregate::AggregateResult;
pub use aggregate::Metric;
pub use aggregate::Unit;
pub use aggregate::aggregate;
pub use aggregate::aggregate_parallel;
pub use aggregate::aggregate_serial;

mod run;
pub use run::RunConfig;

mod setting;
pub use setting::Setting;

mod scaling;
pub use scaling::ScalingPoint;
pub use scaling::scaling;
pub use scaling::summarize_scaling;

mod bucket;
pub use bucket::EfficiencyBucket;
pub use bucket::EfficiencyPoint;
pub use bucket::bucket_means;
pub use bucket::efficiency_points;
pub use bucket::summarize_buckets;

mod utils;
pub use utils::Measure;
pub use utils::init_logger;
pub use utils::write_csv;
