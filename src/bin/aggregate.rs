//! Aggregates the repeated trials of one benchmark run and prints the result
//! as `field,value` CSV.
//!
//! ```ignore
//! aggregate timing-data/cal-random-sandy-bridge-5-repeats-n-100-p-8
//! aggregate --serial timing-data/cal-random-sandy-bridge-5-repeats-n-100-p-1
//! ```

extern crate apsp_evaluation;
extern crate csv;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
#[macro_use]
extern crate structopt;

use apsp_evaluation::errors::*;
use apsp_evaluation::{Unit, aggregate, aggregate_parallel, init_logger};
use std::io;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "aggregate")]
#[structopt(about = "Aggregate the repeated trials of one benchmark run")]
struct Opt {
    /// Trials are read from `{prefix}.0.csv`, `{prefix}.1.csv`, ...
    #[structopt(help = "Trial prefix, without index and extension")]
    prefix: String,

    /// The run is the single-element baseline.
    #[structopt(short = "s", long = "serial")]
    #[structopt(help = "Aggregate a sequential run")]
    serial: bool,

    /// Print per-trial totals before the aggregate. Grid runs only.
    #[structopt(short = "t", long = "trials", conflicts_with = "serial")]
    #[structopt(help = "Also print per-trial totals (grid runs only)")]
    trials: bool,
}

fn run() -> Result<()> {
    init_logger();
    let opt = Opt::from_args();
    debug!("{:?}", opt);

    let unit = if opt.serial { Unit::Serial } else { Unit::Parallel };
    let result = if opt.trials {
        let (result, set) = aggregate_parallel(&opt.prefix)?;
        let mut writer = csv::Writer::from_writer(io::stdout());
        for summary in set.summaries() {
            writer.serialize(summary)?;
        }
        writer.flush()?;
        println!();
        result
    } else {
        aggregate(&opt.prefix, unit)?
    };

    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(&["field", "value"])?;
    for (field, value) in result.fields() {
        writer.serialize((field, value))?;
    }
    writer.flush()?;
    Ok(())
}

quick_main!(run);
