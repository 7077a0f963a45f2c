// Pixel-space placement: pane rects, divider rects, and hit-testing.

use crate::layout::{PaneId, SplitDirection, SplitLayout};

/// Default width of a divider bar in pixels.
pub const DIVIDER_WIDTH: f32 = 2.0;

/// Default hit-test margin in pixels around a divider.
pub const HIT_TEST_MARGIN: f32 = 8.0;

/// A rectangle in physical pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point (px, py) is inside this rectangle. Inclusive on the
    /// top/left edge, exclusive on the bottom/right edge.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Extent of this rect along the given split axis.
    pub fn extent_along(&self, direction: SplitDirection) -> f32 {
        match direction {
            SplitDirection::Horizontal => self.width,
            SplitDirection::Vertical => self.height,
        }
    }
}

/// The divider bar between two adjacent panes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerInfo {
    /// Physical pixel rect of the divider line.
    pub rect: Rect,
    /// Axis of the layout that owns this divider. A horizontal layout has
    /// vertical divider lines (resize left/right) and vice versa.
    pub direction: SplitDirection,
    /// The divider sits between panes `boundary` and `boundary + 1`.
    pub boundary: usize,
}

/// Compute the rect of every pane in visual order by walking the ratio list
/// along the split axis.
pub fn pane_rects(layout: &SplitLayout, bounds: Rect) -> Vec<(PaneId, Rect)> {
    let mut rects = Vec::with_capacity(layout.len());
    let mut offset = 0.0;
    for pane in layout.panes() {
        let rect = match layout.direction() {
            SplitDirection::Horizontal => Rect::new(
                bounds.x + bounds.width * offset,
                bounds.y,
                bounds.width * pane.ratio,
                bounds.height,
            ),
            SplitDirection::Vertical => Rect::new(
                bounds.x,
                bounds.y + bounds.height * offset,
                bounds.width,
                bounds.height * pane.ratio,
            ),
        };
        rects.push((pane.id, rect));
        offset += pane.ratio;
    }
    rects
}

/// Compute one divider rect per pane boundary, centered on the boundary.
pub fn divider_rects(layout: &SplitLayout, bounds: Rect, width: f32) -> Vec<DividerInfo> {
    let mut dividers = Vec::new();
    let mut offset = 0.0;
    for (boundary, pane) in layout.panes().iter().enumerate() {
        offset += pane.ratio;
        if boundary + 1 == layout.len() {
            break; // no divider after the last pane
        }
        let rect = match layout.direction() {
            SplitDirection::Horizontal => {
                let x = bounds.x + bounds.width * offset;
                Rect::new(x - width / 2.0, bounds.y, width, bounds.height)
            }
            SplitDirection::Vertical => {
                let y = bounds.y + bounds.height * offset;
                Rect::new(bounds.x, y - width / 2.0, bounds.width, width)
            }
        };
        dividers.push(DividerInfo {
            rect,
            direction: layout.direction(),
            boundary,
        });
    }
    dividers
}

/// Hit-test a point against dividers, returning the boundary index of the
/// first divider within `margin` pixels along the thin axis.
pub fn hit_test_divider(
    point: (f32, f32),
    dividers: &[DividerInfo],
    margin: f32,
) -> Option<usize> {
    let (px, py) = point;
    for divider in dividers {
        let r = &divider.rect;
        let expanded = match divider.direction {
            SplitDirection::Horizontal => {
                Rect::new(r.x - margin, r.y, r.width + margin * 2.0, r.height)
            }
            SplitDirection::Vertical => {
                Rect::new(r.x, r.y - margin, r.width, r.height + margin * 2.0)
            }
        };
        if expanded.contains_point(px, py) {
            return Some(divider.boundary);
        }
    }
    None
}

/// Find the pane containing the given point, if any.
pub fn pane_at(layout: &SplitLayout, bounds: Rect, point: (f32, f32)) -> Option<PaneId> {
    pane_rects(layout, bounds)
        .into_iter()
        .find(|(_, rect)| rect.contains_point(point.0, point.1))
        .map(|(id, _)| id)
}
