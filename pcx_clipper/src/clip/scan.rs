/// Parallel scan and compaction.
///
/// Applies the bounds-test kernel to every point of a set and writes
/// the ascending list of survivors into a `SurvivorIndices` buffer.
/// The index range is split into blocks that rayon processes in
/// parallel; the last block may be shorter than the block size.
///
/// Two strategies produce identical output:
///
/// - `Append`: each block collects its survivors locally and appends
///   them to one shared list. Blocks finish in any order, so a radix
///   sort of the (unique) indices restores source order afterwards.
/// - `FixedSlot`: each point writes a keep marker into its own slot of
///   a scratch array, then a sequential pass compacts the kept slots.
///   The marker array is scratch only and never handed out.

use std::sync::{Mutex, PoisonError};
use glam::Vec3;
use rayon::prelude::*;
use rdst::RadixSort;
use super::clip_volume::ClipVolume;
use super::survivor_indices::SurvivorIndices;

/// Points per parallel block (matches a 128-wide compute thread group)
pub const DEFAULT_BLOCK_SIZE: usize = 128;

/// How survivors are gathered from the parallel blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// Shared append list followed by an ascending radix sort pass
    #[default]
    Append,
    /// Per-slot keep markers followed by a sequential compaction pass
    FixedSlot,
}

/// Scan `points` against `volume` and replace the contents of `out`
/// with the ascending indices of the points strictly inside.
///
/// `block_size` of 0 is treated as 1.
pub fn scan_into(
    points: &[Vec3],
    volume: &ClipVolume,
    strategy: ScanStrategy,
    block_size: usize,
    out: &mut SurvivorIndices,
) {
    debug_assert!(points.len() <= u32::MAX as usize, "point set exceeds u32 index range");

    out.clear();
    if points.is_empty() {
        return;
    }
    let block_size = block_size.max(1);

    match strategy {
        ScanStrategy::Append => append_scan(points, volume, block_size, out),
        ScanStrategy::FixedSlot => fixed_slot_scan(points, volume, block_size, out),
    }

    crate::engine_trace!("pcx::scan",
        "{:?} scan: {} / {} points survive ({} blocks)",
        strategy, out.len(), points.len(), points.len().div_ceil(block_size));
}

/// Scan with the default strategy and block size into a fresh buffer.
pub fn scan(points: &[Vec3], volume: &ClipVolume) -> Vec<u32> {
    let mut out = SurvivorIndices::with_capacity(points.len());
    scan_into(points, volume, ScanStrategy::default(), DEFAULT_BLOCK_SIZE, &mut out);
    out.into_vec()
}

fn append_scan(
    points: &[Vec3],
    volume: &ClipVolume,
    block_size: usize,
    out: &mut SurvivorIndices,
) {
    // Moving the Vec in keeps the capacity from previous cycles
    let shared = Mutex::new(std::mem::take(&mut out.indices));

    points
        .par_chunks(block_size)
        .enumerate()
        .for_each_init(Vec::<u32>::new, |local, (block, chunk)| {
            local.clear();
            let base = block * block_size;
            for (offset, p) in chunk.iter().enumerate() {
                if volume.contains(*p) {
                    local.push((base + offset) as u32);
                }
            }
            if !local.is_empty() {
                shared
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend_from_slice(local);
            }
        });

    let mut indices = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
    indices.radix_sort_unstable();
    out.indices = indices;
}

fn fixed_slot_scan(
    points: &[Vec3],
    volume: &ClipVolume,
    block_size: usize,
    out: &mut SurvivorIndices,
) {
    out.marks.clear();
    out.marks.resize(points.len(), 0);

    out.marks
        .par_chunks_mut(block_size)
        .zip(points.par_chunks(block_size))
        .for_each(|(slots, chunk)| {
            for (slot, p) in slots.iter_mut().zip(chunk) {
                *slot = volume.contains(*p) as u8;
            }
        });

    // Compaction: a discarded slot must never alias a kept index
    let SurvivorIndices { indices, marks } = out;
    indices.extend(
        marks
            .iter()
            .enumerate()
            .filter(|(_, keep)| **keep != 0)
            .map(|(i, _)| i as u32),
    );
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
