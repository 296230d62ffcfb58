use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
/// A benchmark run is identified by its problem size and grid size.
///
/// The grid size `p` must be positive; the constructors panic on `p == 0`.
pub struct RunConfig {
    /// Problem size (number of vertices). Runs on one fixed graph leave it
    /// out of their file names.
    pub n: Option<usize>,

    /// The grid has `p × p` processing elements.
    pub p: usize,
}

impl RunConfig {
    /// Creates a new `RunConfig`
    pub fn new(n: usize, p: usize) -> Self {
        assert!(p > 0, "grid size must be positive");
        RunConfig { n: Some(n), p: p }
    }

    /// A run on a fixed-size problem, named by grid size only.
    pub fn fixed(p: usize) -> Self {
        assert!(p > 0, "grid size must be positive");
        RunConfig { n: None, p: p }
    }

    /// The sequential run of the same problem.
    pub fn serial(&self) -> Self {
        RunConfig { n: self.n, p: 1 }
    }

    /// Gets the trial prefix of this run under `base`.
    pub fn derive_prefix(&self, base: &str) -> String {
        match self.n {
            Some(n) => format!("{}-n-{}-p-{}", base, n, self.p),
            None => format!("{}-p-{}", base, self.p),
        }
    }

    /// Side length of the submatrix each processing element holds, given the
    /// problem size. Panics if `p` is zero.
    pub fn submatrix_size(&self, n: usize) -> usize {
        (n + self.p - 1) / self.p
    }
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.p == 1 {
            write!(f, "sequential")
        } else {
            write!(f, "{}x{}", self.p, self.p)
        }
    }
}
