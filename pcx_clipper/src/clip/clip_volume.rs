/// Axis-aligned clip volume and the point bounds-test kernel.
///
/// The volume is a plain `Copy` value: every scan of a cycle receives
/// its own copy, so the controller can keep editing the live value
/// without ever exposing a half-written box to a running scan.

use glam::Vec3;

/// Strict point-in-box test on all six faces.
///
/// A point lying exactly on a face is outside. NaN coordinates are
/// outside as well, since every comparison with NaN is false.
#[inline]
pub fn point_in_aabb(p: Vec3, min: Vec3, max: Vec3) -> bool {
    p.cmpgt(min).all() && p.cmplt(max).all()
}

/// Axis-Aligned clip box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipVolume {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl ClipVolume {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Build a box from its center and full size (extent on each axis).
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self { min: center - half, max: center + half }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Whether no point can pass the strict test (min >= max on some axis).
    pub fn is_empty(&self) -> bool {
        !self.min.cmplt(self.max).all()
    }

    /// Shift both corners by `offset`.
    ///
    /// Used with `-world_offset` to bring a world-space box into the
    /// local frame of a source whose transform is a pure translation.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self { min: self.min + offset, max: self.max + offset }
    }

    /// Bounds test for a single point (see `point_in_aabb`)
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        point_in_aabb(p, self.min, self.max)
    }
}

impl Default for ClipVolume {
    /// Unit box centered on the origin.
    fn default() -> Self {
        Self::from_center_size(Vec3::ZERO, Vec3::ONE)
    }
}

#[cfg(test)]
#[path = "clip_volume_tests.rs"]
mod tests;
