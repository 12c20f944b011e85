//! Deferred refresh requests.

use crate::math::Rect;

/// Union of normalized rectangles waiting to be refreshed.
///
/// Change commands only record their area here; the owner drains the
/// accumulated rectangle on its own schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DirtyRegions {
    pending: Option<Rect>,
    requests: usize,
}

impl DirtyRegions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a changed area. Zero-area rectangles are ignored.
    pub fn mark(&mut self, rect: Rect) {
        let rect = rect.saturated();
        if rect.is_empty() {
            return;
        }
        self.pending = Some(match self.pending {
            Some(existing) => existing.union(&rect),
            None => rect,
        });
        self.requests += 1;
    }

    /// Mark the whole terrain.
    pub fn mark_all(&mut self) {
        self.mark(Rect::UNIT);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    /// Accumulated rectangle, if any.
    pub fn pending(&self) -> Option<Rect> {
        self.pending
    }

    /// Number of requests merged since the last drain.
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Take the accumulated rectangle and reset.
    pub fn take(&mut self) -> Option<Rect> {
        self.requests = 0;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_union_of_marks() {
        let mut dirty = DirtyRegions::new();
        assert!(dirty.is_empty());
        dirty.mark(Rect::new(Vec2::new(0.1, 0.1), Vec2::new(0.2, 0.3)));
        dirty.mark(Rect::new(Vec2::new(0.5, 0.0), Vec2::new(0.6, 0.2)));
        assert_eq!(dirty.requests(), 2);
        assert_eq!(dirty.pending(), Some(Rect::new(Vec2::new(0.1, 0.0), Vec2::new(0.6, 0.3))));

        let taken = dirty.take();
        assert!(taken.is_some());
        assert!(dirty.is_empty());
        assert_eq!(dirty.requests(), 0);
    }

    #[test]
    fn test_empty_and_out_of_range_marks() {
        let mut dirty = DirtyRegions::new();
        dirty.mark(Rect::default());
        dirty.mark(Rect::new(Vec2::splat(2.0), Vec2::splat(3.0)));
        assert!(dirty.is_empty());

        dirty.mark(Rect::new(Vec2::splat(-1.0), Vec2::splat(0.5)));
        assert_eq!(dirty.pending(), Some(Rect::new(Vec2::ZERO, Vec2::splat(0.5))));
    }
}
