/// One scan running on the worker pool.
///
/// The survivor buffer is moved into the task and handed back through
/// a single-slot channel, so nothing else can touch it while the scan
/// runs.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use glam::Vec3;
use rayon::ThreadPool;
use crate::clip::{ClipVolume, SurvivorIndices, scan_into};
use crate::config::ClipperConfig;
use crate::error::Result;
use crate::engine_err;
use crate::resource::PointMeshId;
use super::clip_entry::ClipEntryKey;

/// Meshes whose next scan panics on the worker
#[cfg(test)]
pub(crate) static FAILING_SCANS: std::sync::Mutex<Vec<PointMeshId>> = std::sync::Mutex::new(Vec::new());

#[cfg(test)]
fn take_injected_failure(mesh_id: PointMeshId) -> bool {
    let mut failing = FAILING_SCANS.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    match failing.iter().position(|id| *id == mesh_id) {
        Some(index) => {
            failing.swap_remove(index);
            true
        }
        None => false,
    }
}

pub(crate) struct ScanHandle {
    key: ClipEntryKey,
    mesh_id: PointMeshId,
    receiver: Receiver<SurvivorIndices>,
}

impl ScanHandle {
    /// Launch a scan of `positions` against `volume` on `pool`.
    pub(crate) fn spawn(
        pool: &ThreadPool,
        key: ClipEntryKey,
        mesh_id: PointMeshId,
        positions: Arc<[Vec3]>,
        volume: ClipVolume,
        config: ClipperConfig,
        mut survivors: SurvivorIndices,
    ) -> Self {
        let (sender, receiver) = mpsc::sync_channel(1);
        pool.spawn(move || {
            #[cfg(test)]
            if take_injected_failure(mesh_id) {
                panic!("injected scan failure for {}", mesh_id);
            }
            scan_into(&positions, &volume, config.strategy, config.effective_block_size(), &mut survivors);
            // Fails only if the handle was dropped, in which case nobody wants the result
            let _ = sender.send(survivors);
        });
        Self { key, mesh_id, receiver }
    }

    pub(crate) fn key(&self) -> ClipEntryKey {
        self.key
    }

    /// Block until the scan finishes and take its buffer back.
    pub(crate) fn wait(self) -> Result<SurvivorIndices> {
        self.receiver.recv().map_err(|_| engine_err!("pcx::ClipperSystem", WorkerLost,
            "scan of {} ended without a result", self.mesh_id))
    }
}
