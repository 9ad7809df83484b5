/// PointMesh — a point cloud plus the index list a renderer draws.
///
/// The mesh is shared (`Arc`) between its owner and the clippers.
/// Identity is the mesh itself (`PointMeshId`), never its contents:
/// two meshes built from the same cloud are registered separately.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use glam::Vec3;
use super::point_cloud::{PointCloud, Color32, IndexFormat};

static NEXT_MESH_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a PointMesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointMeshId(u64);

impl PointMeshId {
    fn next() -> Self {
        Self(NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PointMeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh #{}", self.0)
    }
}

/// Applied point topology
struct Topology {
    indices: Vec<u32>,
    /// Clip cycle that produced `indices` (None = unfiltered)
    cycle: Option<u64>,
}

/// A point cloud with a mutable point-topology index list
pub struct PointMesh {
    id: PointMeshId,
    cloud: PointCloud,
    index_format: IndexFormat,
    topology: RwLock<Topology>,
}

impl PointMesh {
    /// Wrap a cloud; every point starts visible (`0..N-1`).
    pub fn new(cloud: PointCloud) -> Self {
        let count = cloud.len();
        Self {
            id: PointMeshId::next(),
            index_format: IndexFormat::for_point_count(count),
            topology: RwLock::new(Topology {
                indices: (0..count as u32).collect(),
                cycle: None,
            }),
            cloud,
        }
    }

    pub fn id(&self) -> PointMeshId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.cloud.name()
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn positions(&self) -> &[Vec3] {
        self.cloud.positions()
    }

    pub fn point_count(&self) -> usize {
        self.cloud.len()
    }

    pub fn index_format(&self) -> IndexFormat {
        self.index_format
    }

    /// Replace the visible index list with a clip result.
    pub fn set_indices(&self, indices: &[u32], cycle: u64) {
        debug_assert!(indices.iter().all(|&i| (i as usize) < self.cloud.len()));
        let mut topology = self.topology.write().unwrap_or_else(PoisonError::into_inner);
        topology.indices.clear();
        topology.indices.extend_from_slice(indices);
        topology.cycle = Some(cycle);
    }

    /// Restore the unfiltered `0..N-1` index list.
    pub fn reset_indices(&self) {
        let count = self.cloud.len() as u32;
        let mut topology = self.topology.write().unwrap_or_else(PoisonError::into_inner);
        topology.indices.clear();
        topology.indices.extend(0..count);
        topology.cycle = None;
    }

    /// Run `f` on the visible index list without copying it.
    pub fn with_indices<R>(&self, f: impl FnOnce(&[u32]) -> R) -> R {
        let topology = self.topology.read().unwrap_or_else(PoisonError::into_inner);
        f(&topology.indices)
    }

    /// Copy of the visible index list
    pub fn indices(&self) -> Vec<u32> {
        self.with_indices(|indices| indices.to_vec())
    }

    pub fn visible_count(&self) -> usize {
        self.with_indices(|indices| indices.len())
    }

    /// Cycle of the last published clip result, None when unfiltered
    pub fn applied_cycle(&self) -> Option<u64> {
        self.topology.read().unwrap_or_else(PoisonError::into_inner).cycle
    }

    /// Positions of the visible points, in index order
    pub fn visible_positions(&self) -> Vec<Vec3> {
        let positions = self.cloud.positions();
        self.with_indices(|indices| indices.iter().map(|&i| positions[i as usize]).collect())
    }

    /// Colors of the visible points, in index order
    pub fn visible_colors(&self) -> Option<Vec<Color32>> {
        let colors = self.cloud.colors()?;
        Some(self.with_indices(|indices| indices.iter().map(|&i| colors[i as usize]).collect()))
    }
}

impl fmt::Debug for PointMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointMesh")
            .field("id", &self.id)
            .field("name", &self.cloud.name())
            .field("points", &self.cloud.len())
            .field("visible", &self.visible_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "point_mesh_tests.rs"]
mod tests;
