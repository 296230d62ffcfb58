//! Buckets the compute ratio of every trial in a report by submatrix size per
//! processing element.

extern crate apsp_evaluation;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
#[macro_use]
extern crate structopt;

use apsp_evaluation::errors::*;
use apsp_evaluation::{Setting, init_logger, summarize_buckets};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "bucket")]
#[structopt(about = "Group parallel efficiency by submatrix size per processing element")]
struct Opt {
    /// The report setting in TOML.
    #[structopt(help = "Path to the report setting")]
    setting_path: String,
}

fn run() -> Result<()> {
    init_logger();
    let opt = Opt::from_args();
    debug!("{:?}", opt);

    let setting = Setting::init(&opt.setting_path)?;
    let (points, means) = summarize_buckets(&setting)?;
    println!("{}", points.display());
    println!("{}", means.display());
    Ok(())
}

quick_main!(run);
