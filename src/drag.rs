// Pointer-drag session over a pane boundary. At most one drag is active at
// a time; the session lives from pointer-down on a divider to release.

use crate::layout::SplitLayout;

/// A drag in progress, anchored on the boundary between panes `boundary`
/// and `boundary + 1`. The neighbor ratios are captured at drag start:
/// every move event carries a delta from the start coordinate, so each move
/// is evaluated against the start snapshot rather than the live ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    boundary: usize,
    start_coord: f32,
    extent: f32,
    start_first: f32,
    start_second: f32,
}

impl DragSession {
    /// Begin a drag on `boundary` at pointer coordinate `coord` along the
    /// split axis, with `extent` the container's size along that axis.
    /// Returns `None` for an out-of-range boundary or a non-positive extent.
    pub fn begin(layout: &SplitLayout, boundary: usize, coord: f32, extent: f32) -> Option<Self> {
        if boundary + 1 >= layout.len() || extent <= 0.0 {
            return None;
        }
        let panes = layout.panes();
        Some(Self {
            boundary,
            start_coord: coord,
            extent,
            start_first: panes[boundary].ratio,
            start_second: panes[boundary + 1].ratio,
        })
    }

    pub fn boundary(&self) -> usize {
        self.boundary
    }

    /// Pointer travel since drag start as a fraction of the container.
    pub fn delta_ratio(&self, coord: f32) -> f32 {
        (coord - self.start_coord) / self.extent
    }

    /// Apply one pointer-move event. Returns whether the move was committed;
    /// a move that would starve either neighbor leaves the layout unchanged.
    pub fn apply(&self, layout: &mut SplitLayout, coord: f32) -> bool {
        layout.drag_resize(
            self.boundary,
            self.start_first,
            self.start_second,
            self.delta_ratio(coord),
        )
    }
}
