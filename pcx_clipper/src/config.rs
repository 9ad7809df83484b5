/// Clipper configuration.
///
/// Chooses the compaction strategy, the parallel grain and the size of
/// the worker pool shared by every scan of a `ClipperSystem`.

use crate::clip::{ScanStrategy, DEFAULT_BLOCK_SIZE};

/// Configuration for `ClipperSystem` and `PointClipper`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipperConfig {
    /// Survivor gathering strategy
    pub strategy: ScanStrategy,
    /// Points per parallel block (0 is treated as 1)
    pub block_size: usize,
    /// Worker pool size; `None` lets rayon pick (one per logical CPU)
    pub worker_threads: Option<usize>,
}

impl ClipperConfig {
    pub fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads.max(1));
        self
    }

    /// Block size actually used by the scans
    pub fn effective_block_size(&self) -> usize {
        self.block_size.max(1)
    }
}

impl Default for ClipperConfig {
    fn default() -> Self {
        Self {
            strategy: ScanStrategy::Append,
            block_size: DEFAULT_BLOCK_SIZE,
            worker_threads: None,
        }
    }
}
