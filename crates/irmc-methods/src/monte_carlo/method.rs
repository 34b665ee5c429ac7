//! Random source, path count and block management shared by the model
//! methods.

use irmc_core::{errors::Result, Real, Time};
use irmc_math::RandomNumberGenerator;

/// Tuning knobs of a Monte Carlo run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    /// Maximum number of paths simulated at once.
    pub block_size: usize,
    /// Decision variances below this are treated as zero (already fixed).
    pub zero_variance_threshold: Real,
    /// Longest sub-step of the LMM evolution.
    pub max_jump: Time,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            block_size: 1000,
            zero_variance_threshold: 1.0e-12,
            max_jump: 1.0,
        }
    }
}

impl MonteCarloConfig {
    /// Override the block size.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Override the zero-variance threshold.
    pub fn with_zero_variance_threshold(mut self, threshold: Real) -> Self {
        self.zero_variance_threshold = threshold;
        self
    }

    /// Override the maximum LMM sub-step.
    pub fn with_max_jump(mut self, max_jump: Time) -> Self {
        self.max_jump = max_jump;
        self
    }

    /// Check the values are usable.
    pub fn validate(&self) -> Result<()> {
        irmc_core::ensure!(self.block_size > 0, "block size must be positive");
        irmc_core::ensure!(
            self.zero_variance_threshold >= 0.0,
            "zero-variance threshold must be non-negative"
        );
        irmc_core::ensure!(self.max_jump > 0.0, "maximum jump must be positive");
        Ok(())
    }
}

/// Split `nb_path` paths into blocks of at most `block_size`; only the
/// last block may be smaller.
pub fn block_sizes(nb_path: usize, block_size: usize) -> Result<Vec<usize>> {
    irmc_core::ensure!(nb_path > 0, "number of paths must be positive");
    irmc_core::ensure!(block_size > 0, "block size must be positive");
    let nb_block = nb_path.div_ceil(block_size);
    let mut sizes = vec![block_size; nb_block];
    sizes[nb_block - 1] = nb_path - (nb_block - 1) * block_size;
    Ok(sizes)
}

/// Random source and path count of a Monte Carlo run.
#[derive(Debug, Clone)]
pub struct MonteCarloMethod<R> {
    rng: R,
    nb_path: usize,
    config: MonteCarloConfig,
}

impl<R: RandomNumberGenerator> MonteCarloMethod<R> {
    /// A method drawing from `rng` with the default configuration.
    pub fn new(rng: R, nb_path: usize) -> Self {
        Self {
            rng,
            nb_path,
            config: MonteCarloConfig::default(),
        }
    }

    /// A method with an explicit configuration.
    pub fn with_config(rng: R, nb_path: usize, config: MonteCarloConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rng,
            nb_path,
            config,
        })
    }

    /// Number of simulated paths.
    pub fn nb_path(&self) -> usize {
        self.nb_path
    }

    /// Configuration.
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Block decomposition of the paths.
    pub fn block_sizes(&self) -> Result<Vec<usize>> {
        block_sizes(self.nb_path, self.config.block_size)
    }

    /// Independent standard normals indexed `[row][path]`, one generator
    /// call per row.
    pub fn normal_array(&mut self, nb_row: usize, nb_path: usize) -> Vec<Vec<Real>> {
        (0..nb_row).map(|_| self.rng.get_vector(nb_path)).collect()
    }
}
