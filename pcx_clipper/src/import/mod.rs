//! Point cloud importers
//!
//! Importers either return a complete, well-formed `PointCloud` or an
//! error. A partially read cloud is never handed to the clipping core.

mod xyz_importer;

pub use xyz_importer::{XyzImporter, DEFAULT_MAX_POINTS};
