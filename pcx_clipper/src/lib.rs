/*!
# Pcx Clipper

Parallel axis-aligned box clipping for point clouds and point-sampled meshes.

Each update, every registered point set is tested against a clip box and the
indices of the points strictly inside are compacted into an ascending index
list, which the owning mesh then draws instead of its full point range.

## Architecture

- **ClipVolume**: the clip box and the strict point-in-box kernel
- **scan / scan_into**: parallel block scan producing ascending survivors
- **ClipperSystem**: registry batching one scan per mesh per cycle, with a
  two-phase `begin_cycle` / `end_cycle` protocol
- **PointClipper**: synchronous clipper for a single mesh
- **PointMesh / PointCloud**: point payload and the applied index list
- **XyzImporter**: `.xyz` text importer
*/

// Internal modules
mod error;
mod engine;
mod config;
pub mod log;
pub mod clip;
pub mod resource;
pub mod import;
pub mod system;

// Main pcx namespace module
pub mod pcx {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging host
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::ClipperConfig;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Clipping core
    pub mod clip {
        pub use crate::clip::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Import sub-module
    pub mod import {
        pub use crate::import::*;
    }

    // Systems sub-module
    pub mod system {
        pub use crate::system::*;
    }
}

// Re-export math library at crate root
pub use glam;
