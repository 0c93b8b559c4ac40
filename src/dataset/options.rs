use std::path::PathBuf;

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 2;
pub const DEFAULT_VALUE_BASE: f64 = 10.0;
pub const DEFAULT_FILENAME: &str = "kdtree-input.txt";
/// Width of the sampled interval `[value_base, value_base + VALUE_SPAN)`.
pub const VALUE_SPAN: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub path: PathBuf,
    pub rows: usize,
    pub cols: usize,
    /// Lower bound of every sampled value.
    pub value_base: f64,
    /// Fixed RNG seed; `None` draws from OS entropy and is not reproducible.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("..").join(DEFAULT_FILENAME),
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            value_base: DEFAULT_VALUE_BASE,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new(path: impl Into<PathBuf>, rows: usize, cols: usize) -> Self {
        Self { path: path.into(), rows, cols, ..Default::default() }
    }

    pub fn with_value_base(mut self, value_base: f64) -> Self {
        self.value_base = value_base;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
