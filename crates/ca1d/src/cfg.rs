//! Limits and search configuration.
//!
//! Policy
//! - Size limits are fixed constants: the whole configuration space is
//!   materialized and the searches are exhaustive, so these bound the work.
//! - Runtime knobs that do not change results (threading) live in `SearchCfg`.

use rayon::ThreadPoolBuilder;

use crate::error::CaError;

/// Largest supported number of cells (graph of `2^10 = 1024` nodes).
pub const MAX_SIZE: usize = 10;
/// Largest supported left radius.
pub const MAX_LEFT_RADIUS: usize = 2;
/// Largest supported right radius.
pub const MAX_RIGHT_RADIUS: usize = 2;
/// Largest cycle count for which the reversal explorer enumerates `2^k` subsets.
pub const MAX_REVERSAL_CYCLES: usize = 24;

/// Search configuration shared by the permutation and reversal searches.
#[derive(Clone, Copy, Debug)]
pub struct SearchCfg {
    /// Fan the outer rotation index of permutation searches out to rayon workers.
    pub parallel: bool,
    /// Run on a dedicated pool of this many threads instead of rayon's global one.
    pub max_threads: Option<usize>,
    /// Refuse reversal enumeration above this many cycles.
    pub max_reversal_cycles: usize,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            parallel: true,
            max_threads: None,
            max_reversal_cycles: MAX_REVERSAL_CYCLES,
        }
    }
}

impl SearchCfg {
    /// Single-threaded configuration; results are emitted in enumeration order.
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Run `op` inside the configured thread pool.
    pub(crate) fn install<R, F>(&self, op: F) -> Result<R, CaError>
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match self.max_threads {
            Some(n) if self.parallel => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(n.max(1))
                    .build()
                    .map_err(|err| CaError::ThreadPool(err.to_string()))?;
                Ok(pool.install(op))
            }
            _ => Ok(op()),
        }
    }
}
