/// PointClipper — synchronous clipping of a single mesh.
///
/// Opening a clipper copies the mesh positions and reserves a survivor
/// buffer; dropping it (or calling `close`) releases both and restores
/// the full index range on the mesh. Scans run on the global rayon pool,
/// so `ClipperConfig::worker_threads` is not used here.

use std::sync::Arc;
use glam::Vec3;
use crate::clip::{ClipVolume, SurvivorIndices, scan_into};
use crate::config::ClipperConfig;
use crate::resource::PointMesh;

pub struct PointClipper {
    mesh: Arc<PointMesh>,
    positions: Vec<Vec3>,
    survivors: SurvivorIndices,
    config: ClipperConfig,
    cycle: u64,
}

impl PointClipper {
    pub fn open(mesh: &Arc<PointMesh>, config: ClipperConfig) -> Self {
        let positions = mesh.positions().to_vec();
        crate::engine_debug!("pcx::PointClipper", "Opened clipper on {} ({} points)",
            mesh.id(), positions.len());
        Self {
            survivors: SurvivorIndices::with_capacity(positions.len()),
            mesh: Arc::clone(mesh),
            positions,
            config,
            cycle: 0,
        }
    }

    /// Scan against `volume`, apply the survivors to the mesh and return them.
    pub fn clip(&mut self, volume: &ClipVolume) -> &[u32] {
        scan_into(
            &self.positions,
            volume,
            self.config.strategy,
            self.config.effective_block_size(),
            &mut self.survivors,
        );
        self.cycle += 1;
        self.mesh.set_indices(self.survivors.as_slice(), self.cycle);
        self.survivors.as_slice()
    }

    /// Survivors of the last `clip` (empty before the first one)
    pub fn survivors(&self) -> &[u32] {
        self.survivors.as_slice()
    }

    pub fn mesh(&self) -> &Arc<PointMesh> {
        &self.mesh
    }

    /// Release the clipper now. Same as dropping it.
    pub fn close(self) {}
}

impl Drop for PointClipper {
    fn drop(&mut self) {
        self.mesh.reset_indices();
        crate::engine_debug!("pcx::PointClipper", "Closed clipper on {}", self.mesh.id());
    }
}
