/// ClipperSystem — batched clipping of many meshes against one volume.
///
/// Each update is split in two phases so the host can overlap other
/// work with the scans:
///
/// 1. `begin_cycle()` launches one independent scan per registered mesh
///    on the worker pool, using a copy of the current volume shifted
///    into the mesh frame (`volume - world_offset`).
/// 2. `end_cycle()` blocks until every scan of the batch has finished,
///    then publishes every result. Nothing is published before all
///    scans are done, so consumers never see old and new results from
///    the same cycle side by side.
///
/// When neither the membership nor the volume changed since the last
/// cycle, both phases are no-ops.
///
/// Membership changes requested while a cycle is in flight are queued
/// and applied right after that cycle publishes.

use std::sync::Arc;
use glam::Vec3;
use rayon::{ThreadPool, ThreadPoolBuilder};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::clip::{ClipVolume, SurvivorIndices};
use crate::config::ClipperConfig;
use crate::error::{Error, Result};
use crate::{engine_debug, engine_err, engine_info, engine_warn};
use crate::resource::{PointMesh, PointMeshId};
use super::clip_entry::{ClipEntry, ClipEntryKey};
use super::dirty::DirtyFlags;
use super::scan_job::ScanHandle;

/// Membership change queued during an in-flight cycle
enum Deferred {
    Register(Arc<PointMesh>, Vec3),
    Unregister(PointMeshId),
}

/// Registry of clipped meshes sharing one clip volume
pub struct ClipperSystem {
    config: ClipperConfig,
    pool: ThreadPool,
    volume: ClipVolume,
    entries: SlotMap<ClipEntryKey, ClipEntry>,
    lookup: FxHashMap<PointMeshId, ClipEntryKey>,
    dirty: DirtyFlags,
    /// Some between begin_cycle() and end_cycle(), even for an empty batch
    in_flight: Option<Vec<ScanHandle>>,
    deferred: Vec<Deferred>,
    /// Number of published cycles
    cycle: u64,
}

impl ClipperSystem {
    /// Create a system with its own worker pool and the default unit volume.
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` if the worker pool cannot be built.
    pub fn new(config: ClipperConfig) -> Result<Self> {
        let mut builder = ThreadPoolBuilder::new()
            .thread_name(|i| format!("pcx-clip-{}", i))
            .panic_handler(|_| {
                crate::engine_error!("pcx::ClipperSystem", "Scan task panicked");
            });
        if let Some(threads) = config.worker_threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build().map_err(|e| engine_err!("pcx::ClipperSystem",
            InitializationFailed, "worker pool: {}", e))?;

        engine_info!("pcx::ClipperSystem", "Clipper initialized ({} workers, {:?} strategy)",
            pool.current_num_threads(), config.strategy);

        Ok(Self {
            config,
            pool,
            volume: ClipVolume::default(),
            entries: SlotMap::with_key(),
            lookup: FxHashMap::default(),
            dirty: DirtyFlags::empty(),
            in_flight: None,
            deferred: Vec::new(),
            cycle: 0,
        })
    }

    pub fn config(&self) -> &ClipperConfig {
        &self.config
    }

    // ===== CLIP VOLUME =====

    pub fn volume(&self) -> ClipVolume {
        self.volume
    }

    /// Set the clip volume; marks the system dirty if the value changed.
    ///
    /// A cycle already in flight keeps the volume it was dispatched with.
    pub fn set_volume(&mut self, volume: ClipVolume) {
        if volume != self.volume {
            self.volume = volume;
            self.dirty |= DirtyFlags::VOLUME;
        }
    }

    /// Force a recompute on the next cycle.
    pub fn mark_dirty(&mut self) {
        self.dirty |= DirtyFlags::FORCED;
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    // ===== REGISTRATION =====

    /// Register a mesh for clipping. Registering a mesh twice is a no-op.
    ///
    /// The mesh positions are copied now; `world_offset` is the static
    /// world position of the mesh, used to move the clip volume into
    /// the mesh frame (rotation and scale are not modeled).
    pub fn register(&mut self, mesh: &Arc<PointMesh>, world_offset: Vec3) {
        if self.in_flight.is_some() {
            engine_debug!("pcx::ClipperSystem", "Deferring registration of {}", mesh.id());
            self.deferred.push(Deferred::Register(Arc::clone(mesh), world_offset));
        } else {
            self.apply_register(mesh, world_offset);
        }
    }

    /// Unregister a mesh and restore its full index range.
    /// Unregistering an unknown mesh is a no-op.
    pub fn unregister(&mut self, mesh: &PointMesh) {
        if self.in_flight.is_some() {
            engine_debug!("pcx::ClipperSystem", "Deferring unregistration of {}", mesh.id());
            self.deferred.push(Deferred::Unregister(mesh.id()));
        } else {
            self.apply_unregister(mesh.id());
        }
    }

    pub fn is_registered(&self, id: PointMeshId) -> bool {
        self.lookup.contains_key(&id)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Static world offset recorded for a registered mesh
    pub fn world_offset(&self, id: PointMeshId) -> Option<Vec3> {
        let key = self.lookup.get(&id)?;
        self.entries.get(*key).map(|entry| entry.world_offset)
    }

    /// Move a registered mesh; takes effect on the next dispatch.
    ///
    /// A mesh whose registration is still deferred gets the new offset
    /// when it is registered.
    ///
    /// # Errors
    ///
    /// `Error::InvalidEntry` if the mesh is neither registered nor
    /// pending registration.
    pub fn set_world_offset(&mut self, id: PointMeshId, world_offset: Vec3) -> Result<()> {
        // The latest queued change for this mesh decides what it will be
        for op in self.deferred.iter_mut().rev() {
            match op {
                Deferred::Register(mesh, offset) if mesh.id() == id => {
                    *offset = world_offset;
                    return Ok(());
                }
                Deferred::Unregister(other) if *other == id => {
                    return Err(engine_err!("pcx::ClipperSystem", InvalidEntry,
                        "cannot move {}: unregistration pending", id));
                }
                _ => {}
            }
        }

        let entry = self.lookup.get(&id).and_then(|key| self.entries.get_mut(*key))
            .ok_or_else(|| engine_err!("pcx::ClipperSystem", InvalidEntry,
                "cannot move {}: not registered", id))?;
        if entry.world_offset != world_offset {
            entry.world_offset = world_offset;
            self.dirty |= DirtyFlags::TRANSFORM;
        }
        Ok(())
    }

    /// Latest survivors of a registered mesh.
    ///
    /// None if the mesh is not registered or its scan is in flight.
    pub fn survivors(&self, id: PointMeshId) -> Option<&[u32]> {
        let key = self.lookup.get(&id)?;
        self.entries.get(*key)?.survivors.as_ref().map(|s| s.as_slice())
    }

    fn apply_register(&mut self, mesh: &Arc<PointMesh>, world_offset: Vec3) {
        if self.lookup.contains_key(&mesh.id()) {
            return;
        }
        let key = self.entries.insert(ClipEntry::new(mesh, world_offset));
        self.lookup.insert(mesh.id(), key);
        self.dirty |= DirtyFlags::MEMBERSHIP;
        engine_debug!("pcx::ClipperSystem", "Registered {} '{}' ({} points)",
            mesh.id(), mesh.name(), mesh.point_count());
    }

    fn apply_unregister(&mut self, id: PointMeshId) {
        let Some(key) = self.lookup.remove(&id) else {
            return;
        };
        if let Some(entry) = self.entries.remove(key) {
            entry.mesh.reset_indices();
        }
        self.dirty |= DirtyFlags::MEMBERSHIP;
        engine_debug!("pcx::ClipperSystem", "Unregistered {}", id);
    }

    fn apply_deferred(&mut self) {
        for op in std::mem::take(&mut self.deferred) {
            match op {
                Deferred::Register(mesh, offset) => self.apply_register(&mesh, offset),
                Deferred::Unregister(id) => self.apply_unregister(id),
            }
        }
    }

    // ===== CYCLE =====

    /// Whether begin_cycle() dispatched a batch that end_cycle() has not completed
    pub fn is_cycle_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Number of cycles published so far
    pub fn cycle_count(&self) -> u64 {
        self.cycle
    }

    /// Dispatch phase: launch one scan per registered mesh.
    ///
    /// Returns `Ok(false)` when nothing changed since the last cycle.
    ///
    /// # Errors
    ///
    /// `Error::CycleInProgress` if the previous dispatch was not completed
    /// with `end_cycle()`; the state is left untouched.
    pub fn begin_cycle(&mut self) -> Result<bool> {
        if self.in_flight.is_some() {
            engine_warn!("pcx::ClipperSystem", "begin_cycle() called twice without end_cycle()");
            return Err(Error::CycleInProgress);
        }
        if self.dirty.is_empty() {
            return Ok(false);
        }

        let volume = self.volume;
        let mut handles = Vec::with_capacity(self.entries.len());
        for (key, entry) in self.entries.iter_mut() {
            let survivors = entry.survivors.take().unwrap_or_default();
            handles.push(ScanHandle::spawn(
                &self.pool,
                key,
                entry.mesh.id(),
                Arc::clone(&entry.positions),
                volume.translated(-entry.world_offset),
                self.config,
                survivors,
            ));
        }

        // Edits made while the batch runs belong to the next cycle
        self.dirty = DirtyFlags::empty();
        self.in_flight = Some(handles);
        Ok(true)
    }

    /// Completion phase: wait for every scan, then publish all results.
    ///
    /// Returns `Ok(false)` when no cycle was in flight.
    ///
    /// # Errors
    ///
    /// `Error::WorkerLost` if a scan task died. No result of the batch is
    /// published in that case and the system stays dirty.
    pub fn end_cycle(&mut self) -> Result<bool> {
        let Some(handles) = self.in_flight.take() else {
            return Ok(false);
        };

        // Join everything first; publish nothing until the whole batch is in
        let mut results = Vec::with_capacity(handles.len());
        let mut failure = None;
        for handle in handles {
            let key = handle.key();
            match handle.wait() {
                Ok(survivors) => results.push((key, survivors)),
                Err(e) => {
                    if let Some(entry) = self.entries.get_mut(key) {
                        entry.survivors = Some(SurvivorIndices::with_capacity(entry.positions.len()));
                    }
                    failure.get_or_insert(e);
                }
            }
        }

        if let Some(e) = failure {
            for (key, survivors) in results {
                if let Some(entry) = self.entries.get_mut(key) {
                    entry.survivors = Some(survivors);
                }
            }
            self.dirty |= DirtyFlags::FORCED;
            self.apply_deferred();
            return Err(e);
        }

        self.cycle += 1;
        for (key, survivors) in results {
            if let Some(entry) = self.entries.get_mut(key) {
                entry.mesh.set_indices(survivors.as_slice(), self.cycle);
                entry.survivors = Some(survivors);
            }
        }
        engine_debug!("pcx::ClipperSystem", "Cycle {} published for {} meshes",
            self.cycle, self.entries.len());

        self.apply_deferred();
        Ok(true)
    }

    /// begin_cycle() followed by end_cycle().
    pub fn run_cycle(&mut self) -> Result<bool> {
        if !self.begin_cycle()? {
            return Ok(false);
        }
        self.end_cycle()
    }
}

impl Drop for ClipperSystem {
    fn drop(&mut self) {
        // Scans hold only Arc clones, but their buffers must come home before release
        if let Some(handles) = self.in_flight.take() {
            for handle in handles {
                let _ = handle.wait();
            }
        }
        for (_, entry) in self.entries.drain() {
            entry.mesh.reset_indices();
        }
        self.lookup.clear();
    }
}

#[cfg(test)]
#[path = "clipper_system_tests.rs"]
mod tests;
