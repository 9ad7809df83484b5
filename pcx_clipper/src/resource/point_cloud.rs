/// Imported point cloud payload.
///
/// Positions and optional per-point colors, stored as parallel arrays.
/// Colors are opaque to the clipping core: survivors are re-indexed,
/// never re-colored.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::error::Result;
use crate::engine_err;

/// 8-bit RGBA color
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color32 {
    pub const WHITE: Color32 = Color32::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Width of the point-topology index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    /// Smallest format able to address `point_count` points.
    pub fn for_point_count(point_count: usize) -> Self {
        if point_count > u16::MAX as usize {
            IndexFormat::U32
        } else {
            IndexFormat::U16
        }
    }

    /// Bytes per index
    pub fn size(&self) -> usize {
        match self {
            IndexFormat::U16 => 2,
            IndexFormat::U32 => 4,
        }
    }
}

/// Largest cloud whose point indices all fit in a `u32`
pub const MAX_CLOUD_POINTS: usize = u32::MAX as usize;

/// Rejects clouds that survivor indices could not address.
pub(crate) fn check_point_count(name: &str, count: usize) -> Result<()> {
    if count > MAX_CLOUD_POINTS {
        return Err(engine_err!("pcx::PointCloud", ImportFailed,
            "'{}': {} points exceed the {} addressable by u32 indices", name, count, MAX_CLOUD_POINTS));
    }
    Ok(())
}

/// An ordered set of points with optional colors
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    name: String,
    positions: Vec<Vec3>,
    colors: Option<Vec<Color32>>,
}

impl PointCloud {
    /// Create a cloud from parallel position and color arrays.
    ///
    /// # Errors
    ///
    /// Returns `Error::ImportFailed` if `colors` is present and its length
    /// differs from `positions`, or if there are more than
    /// `MAX_CLOUD_POINTS` points.
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        colors: Option<Vec<Color32>>,
    ) -> Result<Self> {
        let name = name.into();
        check_point_count(&name, positions.len())?;
        if let Some(colors) = &colors {
            if colors.len() != positions.len() {
                return Err(engine_err!("pcx::PointCloud", ImportFailed,
                    "'{}': {} colors for {} positions", name, colors.len(), positions.len()));
            }
        }
        Ok(Self { name, positions, colors })
    }

    /// Create an uncolored cloud.
    ///
    /// # Errors
    ///
    /// Returns `Error::ImportFailed` if there are more than
    /// `MAX_CLOUD_POINTS` points.
    pub fn from_positions(name: impl Into<String>, positions: Vec<Vec3>) -> Result<Self> {
        Self::new(name, positions, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> Option<&[Color32]> {
        self.colors.as_deref()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Raw position bytes (tightly packed `f32` triples) for upload
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw color bytes (RGBA8) for upload
    pub fn color_bytes(&self) -> Option<&[u8]> {
        self.colors.as_deref().map(bytemuck::cast_slice)
    }
}
