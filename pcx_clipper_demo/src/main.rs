//! Pcx clipper demo
//!
//! Usage: pcx_clipper_demo [cloud.xyz] [max_points]
//!
//! Imports the cloud (or generates a synthetic one), registers it twice
//! at different world offsets and sweeps the clip box across both.

use std::sync::Arc;
use pcx_clipper::glam::Vec3;
use pcx_clipper::pcx::{ClipperConfig, Engine, Result};
use pcx_clipper::pcx::clip::ClipVolume;
use pcx_clipper::pcx::import::{XyzImporter, DEFAULT_MAX_POINTS};
use pcx_clipper::pcx::log::LogSeverity;
use pcx_clipper::pcx::resource::{PointCloud, PointMesh};
use pcx_clipper::pcx::system::ClipperSystem;

fn synthetic_cloud(side: usize) -> Result<PointCloud> {
    let step = 1.0 / side as f32;
    let mut positions = Vec::with_capacity(side * side * side);
    for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                positions.push(Vec3::new(x as f32, y as f32, z as f32) * step);
            }
        }
    }
    PointCloud::from_positions("synthetic", positions)
}

fn main() -> Result<()> {
    Engine::set_min_severity(LogSeverity::Debug);

    let mut args = std::env::args().skip(1);
    let cloud = match args.next() {
        Some(path) => {
            let max_points = args
                .next()
                .and_then(|arg| arg.parse().ok())
                .unwrap_or(DEFAULT_MAX_POINTS);
            XyzImporter::new().with_max_points(max_points).import_file(path)?
        }
        None => synthetic_cloud(64)?,
    };

    let left = Arc::new(PointMesh::new(cloud.clone()));
    let right = Arc::new(PointMesh::new(cloud));

    let mut system = ClipperSystem::new(ClipperConfig::default())?;
    system.register(&left, Vec3::ZERO);
    system.register(&right, Vec3::new(2.0, 0.0, 0.0));

    for step in 0..=6 {
        let center = Vec3::new(0.5 * step as f32, 0.5, 0.5);
        system.set_volume(ClipVolume::from_center_size(center, Vec3::splat(0.8)));
        system.begin_cycle()?;
        system.end_cycle()?;
        println!(
            "box at x={:.1}: left {:>7} / {} visible, right {:>7} / {} visible",
            center.x,
            left.visible_count(),
            left.point_count(),
            right.visible_count(),
            right.point_count(),
        );
    }

    // Slide the right copy under the last box position
    system.set_world_offset(right.id(), Vec3::new(2.5, 0.0, 0.0))?;
    system.run_cycle()?;
    println!("right moved to x=2.5: {} / {} visible", right.visible_count(), right.point_count());

    system.unregister(&left);
    system.unregister(&right);
    println!("after unregister: left {} visible, right {} visible",
        left.visible_count(), right.visible_count());
    Ok(())
}
