//! Identifiers and simple allocators for scheduler entities.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TweenId(pub u32);

/// Monotonic allocator for TweenId.
/// Ids are never reused within one scheduler, so a stale id cannot
/// address a newer tween.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_tween: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_tween(&mut self) -> TweenId {
        let id = TweenId(self.next_tween);
        self.next_tween = self.next_tween.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_tween(), TweenId(0));
        assert_eq!(alloc.alloc_tween(), TweenId(1));
    }
}
