//! Generates a scaling series (one metric across problem sizes, one series
//! per grid size) from a report setting.

extern crate apsp_evaluation;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
#[macro_use]
extern crate structopt;

use apsp_evaluation::errors::*;
use apsp_evaluation::{Metric, Setting, init_logger, summarize_scaling};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "scaling")]
#[structopt(about = "Aggregate every run of a report and write a scaling series")]
struct Opt {
    /// The report setting in TOML.
    #[structopt(help = "Path to the report setting")]
    setting_path: String,

    /// One of finish_time, total_time, computation_time,
    /// communication_time, ratio.
    #[structopt(short = "m", long = "metric", default_value = "finish_time")]
    #[structopt(help = "Metric to report")]
    metric: Metric,
}

fn run() -> Result<()> {
    init_logger();
    let opt = Opt::from_args();
    debug!("{:?}", opt);

    let setting = Setting::init(&opt.setting_path)?;
    let path = summarize_scaling(&setting, opt.metric)?;
    println!("{}", path.display());
    Ok(())
}

quick_main!(run);
