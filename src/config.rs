use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::algorithm::Algorithm;
use crate::Result;

/// Settings of the benchmark harness
///
/// Every field has a default, so a JSON config file only needs to list the
/// settings it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Node counts of the dense experiments (~n²/5 edges)
    pub dense_sizes: Vec<usize>,
    /// Node counts of the sparse experiments (~5n edges)
    pub sparse_sizes: Vec<usize>,
    /// `(height, width)` of the grid experiments
    pub grid_dimensions: Vec<(usize, usize)>,
    /// Inclusive weight range of the dense and sparse generators
    pub weight_range: (i64, i64),
    /// Inclusive weight range of the grid generator
    pub grid_weight_range: (i64, i64),
    /// RNG seed; `None` draws from entropy
    pub seed: Option<u64>,
    /// Timed repetitions per (case, algorithm)
    pub iterations: usize,
    /// Run independent cases on the rayon pool
    pub parallel: bool,
    /// Engines to compare
    pub algorithms: Vec<Algorithm>,
    /// Directory holding `leetcode/` and `generated/` JSON datasets
    pub dataset_dir: Option<PathBuf>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            dense_sizes: vec![500, 1_000, 2_000],
            sparse_sizes: vec![10_000, 50_000, 100_000],
            grid_dimensions: vec![(100, 100), (150, 150), (200, 200), (250, 250)],
            weight_range: (1, 100),
            grid_weight_range: (1, 10),
            seed: None,
            iterations: 1,
            parallel: false,
            algorithms: Algorithm::ALL.to_vec(),
            dataset_dir: None,
        }
    }
}

impl BenchmarkConfig {
    /// Reads a config from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&text)?;
        log::debug!("Loaded benchmark config from {}", path.as_ref().display());
        Ok(config)
    }

    /// A small configuration that finishes in well under a second
    pub fn quick() -> Self {
        Self {
            dense_sizes: vec![200],
            sparse_sizes: vec![2_000],
            grid_dimensions: vec![(30, 30)],
            ..Self::default()
        }
    }
}
