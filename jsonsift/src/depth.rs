// SPDX-License-Identifier: Apache-2.0

/// Counts open objects. Arrays are not counted: only objects decide record
/// membership.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DepthTracker {
    depth: usize,
}

impl DepthTracker {
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    /// Current number of open objects.
    pub const fn get(&self) -> usize {
        self.depth
    }

    /// Enters an object and returns the depth before entering it. Zero means
    /// the object is the record itself.
    pub fn on_object_start(&mut self) -> usize {
        let before = self.depth;
        self.depth += 1;
        before
    }

    /// Leaves an object and returns the depth after leaving it. Zero means
    /// the record was just closed.
    pub fn on_object_end(&mut self) -> usize {
        self.depth = self.depth.saturating_sub(1);
        self.depth
    }
}
