/// Survivor index buffer.
///
/// Holds the ascending indices of the points that passed the bounds
/// test. The buffer is cleared, never reallocated, between cycles, so
/// after the first cycle a scan performs no allocation as long as the
/// survivor count stays within the reserved capacity.

/// Compacted, ascending list of surviving point indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurvivorIndices {
    /// Dense survivor list, ascending
    pub(crate) indices: Vec<u32>,
    /// Per-point keep markers used by the fixed-slot strategy (scratch)
    pub(crate) marks: Vec<u8>,
}

impl SurvivorIndices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer able to hold `point_count` survivors without growing.
    pub fn with_capacity(point_count: usize) -> Self {
        Self {
            indices: Vec::with_capacity(point_count),
            marks: Vec::new(),
        }
    }

    /// The unfiltered fallback: every index `0..point_count`.
    pub fn full_range(point_count: usize) -> Self {
        Self {
            indices: (0..point_count as u32).collect(),
            marks: Vec::new(),
        }
    }

    /// Logically clear the buffer, keeping its allocation.
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of survivors the buffer holds without reallocating
    pub fn capacity(&self) -> usize {
        self.indices.capacity()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u32> {
        self.indices.iter()
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.indices
    }
}

impl AsRef<[u32]> for SurvivorIndices {
    fn as_ref(&self) -> &[u32] {
        &self.indices
    }
}

impl<'a> IntoIterator for &'a SurvivorIndices {
    type Item = &'a u32;
    type IntoIter = std::slice::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}

#[cfg(test)]
#[path = "survivor_indices_tests.rs"]
mod tests;
