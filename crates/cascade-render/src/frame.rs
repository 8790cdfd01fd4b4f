#![forbid(unsafe_code)]

//! Frame = Buffer + metadata for a render pass.
//!
//! The `Frame` bundles the cell grid ([`Buffer`]) with an optional hit grid
//! for mouse hit testing.
//!
//! ```
//! use cascade_render::cell::Cell;
//! use cascade_render::frame::{Frame, HitId};
//! use cascade_core::geometry::Rect;
//!
//! let mut frame = Frame::with_hit_grid(10, 2);
//! frame.buffer.set(0, 0, Cell::from_char('H'));
//! frame.register_hit_region(Rect::new(0, 0, 4, 1), HitId::new(7));
//! assert_eq!(frame.hit_test(2, 0).map(|(id, _, _)| id), Some(HitId::new(7)));
//! ```

use crate::buffer::Buffer;
use cascade_core::geometry::Rect;

/// Identifier for a clickable region in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data for hit callbacks.
pub type HitData = u64;

/// Regions within a widget for mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// No interactive region.
    #[default]
    None,
    /// Main content area.
    Content,
}

/// A single hit cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCell {
    /// Widget that registered this cell, if any.
    pub widget_id: Option<HitId>,
    /// Region tag for the hit area.
    pub region: HitRegion,
    /// Extra data attached to this hit cell.
    pub data: HitData,
}

impl HitCell {
    /// Create a populated hit cell.
    #[inline]
    pub const fn new(widget_id: HitId, region: HitRegion, data: HitData) -> Self {
        Self {
            widget_id: Some(widget_id),
            region,
            data,
        }
    }
}

/// Maps screen positions to widget IDs.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    /// Create a new hit grid with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![HitCell::default(); size],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the hit cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&HitCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Register a clickable region. Later registrations overwrite earlier ones.
    pub fn register(&mut self, rect: Rect, widget_id: HitId, region: HitRegion, data: HitData) {
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize);
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize);

        if rect.x as usize >= x_end || rect.y as usize >= y_end {
            return;
        }

        let hit_cell = HitCell::new(widget_id, region, data);

        for y in rect.y as usize..y_end {
            let row_start = y * self.width as usize;
            let start = row_start + rect.x as usize;
            let end = row_start + x_end;
            self.cells[start..end].fill(hit_cell);
        }
    }

    /// Hit test at the given position.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.get(x, y)
            .and_then(|cell| cell.widget_id.map(|id| (id, cell.region, cell.data)))
    }

    /// Clear all hit regions.
    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// The render target for a single pass.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid for this render pass.
    pub buffer: Buffer,

    /// Optional hit grid for mouse hit testing.
    pub hit_grid: Option<HitGrid>,
}

impl Frame {
    /// Create a frame without hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: None,
        }
    }

    /// Create a frame with hit testing enabled.
    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: Some(HitGrid::new(width, height)),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Clear cells and hit regions for the next pass.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if let Some(grid) = self.hit_grid.as_mut() {
            grid.clear();
        }
    }

    /// Register a hit region (if hit grid is enabled).
    ///
    /// The region is clipped to the buffer's current scissor. Returns
    /// `true` if a hit grid is present.
    pub fn register_hit(
        &mut self,
        rect: Rect,
        id: HitId,
        region: HitRegion,
        data: HitData,
    ) -> bool {
        if let Some(ref mut grid) = self.hit_grid {
            let clipped = rect.intersection(&self.buffer.current_scissor());
            if !clipped.is_empty() {
                grid.register(clipped, id, region, data);
            }
            true
        } else {
            false
        }
    }

    /// Hit test at the given position (if hit grid is enabled).
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.as_ref().and_then(|grid| grid.hit_test(x, y))
    }

    /// Register a hit region with default metadata (Content, data=0).
    pub fn register_hit_region(&mut self, rect: Rect, id: HitId) -> bool {
        self.register_hit(rect, id, HitRegion::Content, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_without_grid_is_none() {
        let mut frame = Frame::new(4, 4);
        assert!(!frame.register_hit_region(Rect::new(0, 0, 2, 2), HitId::new(1)));
        assert_eq!(frame.hit_test(0, 0), None);
    }

    #[test]
    fn register_carries_region_and_data() {
        let mut frame = Frame::with_hit_grid(6, 3);
        frame.register_hit(Rect::new(1, 1, 3, 1), HitId::new(9), HitRegion::Content, 42);
        assert_eq!(
            frame.hit_test(2, 1),
            Some((HitId::new(9), HitRegion::Content, 42))
        );
        assert_eq!(frame.hit_test(0, 1), None);
        assert_eq!(frame.hit_test(2, 2), None);
    }

    #[test]
    fn register_clips_to_scissor() {
        let mut frame = Frame::with_hit_grid(6, 1);
        frame.buffer.push_scissor(Rect::new(0, 0, 2, 1));
        frame.register_hit_region(Rect::new(0, 0, 6, 1), HitId::new(1));
        frame.buffer.pop_scissor();
        assert!(frame.hit_test(1, 0).is_some());
        assert!(frame.hit_test(2, 0).is_none());
    }

    #[test]
    fn clear_removes_hits() {
        let mut frame = Frame::with_hit_grid(3, 3);
        frame.register_hit_region(Rect::new(0, 0, 3, 3), HitId::new(1));
        frame.clear();
        assert_eq!(frame.hit_test(1, 1), None);
    }

    #[test]
    fn later_registration_wins() {
        let mut grid = HitGrid::new(4, 1);
        grid.register(Rect::new(0, 0, 4, 1), HitId::new(1), HitRegion::Content, 0);
        grid.register(Rect::new(2, 0, 2, 1), HitId::new(2), HitRegion::Content, 5);
        assert_eq!(grid.hit_test(1, 0).map(|h| h.0), Some(HitId::new(1)));
        assert_eq!(
            grid.hit_test(3, 0),
            Some((HitId::new(2), HitRegion::Content, 5))
        );
    }
}
