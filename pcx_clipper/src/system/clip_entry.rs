/// Registry entry for one clipped mesh.
///
/// The entry owns a snapshot of the mesh positions and the survivor
/// buffer for that mesh. Both live exactly as long as the registration.

use std::sync::Arc;
use glam::Vec3;
use slotmap::new_key_type;
use crate::clip::SurvivorIndices;
use crate::resource::PointMesh;

new_key_type! {
    /// Stable key for a registered mesh within a ClipperSystem.
    pub struct ClipEntryKey;
}

pub(crate) struct ClipEntry {
    /// Consumer the results are published into
    pub(crate) mesh: Arc<PointMesh>,
    /// Positions copied at registration; later edits to the source are not seen
    pub(crate) positions: Arc<[Vec3]>,
    /// None only while lent to an in-flight scan
    pub(crate) survivors: Option<SurvivorIndices>,
    /// Static translation of the mesh in world space
    pub(crate) world_offset: Vec3,
}

impl ClipEntry {
    pub(crate) fn new(mesh: &Arc<PointMesh>, world_offset: Vec3) -> Self {
        let positions: Arc<[Vec3]> = Arc::from(mesh.positions());
        Self {
            survivors: Some(SurvivorIndices::with_capacity(positions.len())),
            mesh: Arc::clone(mesh),
            positions,
            world_offset,
        }
    }
}
