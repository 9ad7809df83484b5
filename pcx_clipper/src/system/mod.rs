//! Clip systems
//!
//! `ClipperSystem` batches one scan per registered mesh and publishes
//! the results together. `PointClipper` clips a single mesh
//! synchronously.

mod dirty;
mod clip_entry;
mod scan_job;
mod clipper_system;
mod point_clipper;

pub use dirty::DirtyFlags;
pub use clipper_system::ClipperSystem;
pub use point_clipper::PointClipper;
