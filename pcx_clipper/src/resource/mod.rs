//! Point data resources
//!
//! `PointCloud` is the immutable payload produced by an importer.
//! `PointMesh` wraps a cloud with the point-topology index list that a
//! renderer draws, and is the consumer the clippers publish into.

mod point_cloud;
mod point_mesh;

pub use point_cloud::{PointCloud, Color32, IndexFormat, MAX_CLOUD_POINTS};
pub use point_mesh::{PointMesh, PointMeshId};
