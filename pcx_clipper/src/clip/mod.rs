//! Clipping core
//!
//! The bounds-test kernel, the survivor index buffer and the parallel
//! scan that fills it.

mod clip_volume;
mod survivor_indices;
mod scan;

pub use clip_volume::{ClipVolume, point_in_aabb};
pub use survivor_indices::SurvivorIndices;
pub use scan::{ScanStrategy, scan, scan_into, DEFAULT_BLOCK_SIZE};
