use bitflags::bitflags;

bitflags! {
    /// Reasons a `ClipperSystem` must recompute on its next cycle.
    ///
    /// An empty set means the published results are current and the
    /// whole cycle can be skipped.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DirtyFlags: u8 {
        /// A mesh was registered or unregistered
        const MEMBERSHIP = 1 << 0;
        /// The clip volume changed
        const VOLUME     = 1 << 1;
        /// Recompute requested explicitly
        const FORCED     = 1 << 2;
        /// A registered mesh moved
        const TRANSFORM  = 1 << 3;
    }
}
