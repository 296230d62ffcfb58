//! A report setting in TOML.
//!
//! ```toml
//! base = "timing-data/cal-random-sandy-bridge/cal-random-sandy-bridge-5-repeats"
//! ns = [10, 20, 30, 40, 50]
//! ps = [4, 8, 16, 32, 64, 128]
//! output_dir = "plots"
//! ```

use errors::*;
use run::RunConfig;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use toml;

/// What a report reads and where it writes.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Setting {
    /// Path prefix shared by every run of the experiment.
    pub base: String,

    /// Prefix of the sequential runs, when they live elsewhere (e.g. shared
    /// between two simulated machines).
    #[serde(default)]
    pub serial_base: Option<String>,

    /// Problem sizes. Leave empty for runs on one fixed graph.
    #[serde(default)]
    pub ns: Vec<usize>,

    /// Grid sizes; a grid has `p × p` processing elements.
    pub ps: Vec<usize>,

    /// Problem size of fixed-graph runs.
    #[serde(default)]
    pub problem_size: Option<usize>,

    /// Whether reports include the sequential baseline.
    #[serde(default = "default_sequential")]
    pub sequential: bool,

    /// Directory for report output.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_sequential() -> bool {
    true
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Setting {
    /// Initialize from a file.
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Setting> {
        let path = path.as_ref();
        let mut file = File::open(path).chain_err(|| format!("no setting file {:?}", path))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Setting::parse(&contents)
    }

    /// Parses and validates a setting.
    pub fn parse(contents: &str) -> Result<Setting> {
        let setting: Setting = toml::from_str(contents)?;
        setting.validate()?;
        Ok(setting)
    }

    fn validate(&self) -> Result<()> {
        if self.ps.is_empty() {
            bail!(ErrorKind::InvalidSetting("no grid size in ps".to_string()));
        }
        if self.ps.contains(&0) {
            bail!(ErrorKind::InvalidSetting("grid size 0 in ps".to_string()));
        }
        if self.ns.is_empty() && self.problem_size.is_none() {
            bail!(ErrorKind::InvalidSetting(
                "either ns or problem_size is required".to_string()
            ));
        }
        Ok(())
    }

    /// Every grid run, grouped by grid size in the order of `ps`.
    pub fn configurations(&self) -> Vec<RunConfig> {
        if self.ns.is_empty() {
            self.ps.iter().map(|&p| RunConfig::fixed(p)).collect()
        } else {
            iproduct!(self.ps.iter(), self.ns.iter())
                .map(|(&p, &n)| RunConfig::new(n, p))
                .collect()
        }
    }

    /// The sequential runs matching `configurations`, one per problem size.
    pub fn serial_configurations(&self) -> Vec<RunConfig> {
        if self.ns.is_empty() {
            vec![RunConfig::fixed(1)]
        } else {
            self.ns.iter().map(|&n| RunConfig::new(n, 1)).collect()
        }
    }

    /// Base of the sequential runs.
    pub fn serial_base(&self) -> &str {
        self.serial_base.as_ref().unwrap_or(&self.base)
    }

    /// Problem size of a run: its own, or the fixed one.
    pub fn problem_size_of(&self, rc: &RunConfig) -> Option<usize> {
        rc.n.or(self.problem_size)
    }

    /// Gets the path of a report output file.
    pub fn output_file(&self, name: &str) -> PathBuf {
        Path::new(&self.output_dir).join(name)
    }
}
