// Layout model: a flat, single-axis list of panes with relative sizes.

use std::fmt;

/// Smallest fraction of the container any pane may occupy.
pub const MIN_RATIO: f32 = 0.1;

/// Tolerance for floating-point ratio comparisons.
pub const RATIO_EPSILON: f32 = 1e-4;

/// Identifier of a terminal session, assigned by the external registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalId(pub u64);

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "term-{}", self.0)
    }
}

/// Unique identifier for a pane, derived from the terminal session it
/// displays. One pane per session, so uniqueness follows from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneId(u64);

impl From<TerminalId> for PaneId {
    fn from(terminal: TerminalId) -> Self {
        Self(terminal.0)
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane-{}", self.0)
    }
}

/// Axis along which panes are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    /// Panes side by side, ordered left to right.
    Horizontal,
    /// Panes stacked, ordered top to bottom.
    Vertical,
}

/// One rectangular region bound to a single terminal session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pane {
    pub id: PaneId,
    pub terminal: TerminalId,
    /// Fraction of the container's extent along the split axis.
    pub ratio: f32,
}

impl Pane {
    fn new(terminal: TerminalId, ratio: f32) -> Self {
        Self {
            id: PaneId::from(terminal),
            terminal,
            ratio,
        }
    }
}

/// An ordered set of panes sharing one split axis. Ratios always sum to 1
/// (within tolerance); list order is the visual left-to-right or
/// top-to-bottom order.
///
/// A `SplitLayout` holds at least two panes. `remove` may leave a single
/// survivor; the owner is expected to dissolve the layout at that point.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitLayout {
    direction: SplitDirection,
    panes: Vec<Pane>,
}

impl SplitLayout {
    /// Build a fresh two-pane layout with an even 0.5/0.5 split.
    pub fn new(direction: SplitDirection, first: TerminalId, second: TerminalId) -> Self {
        Self {
            direction,
            panes: vec![Pane::new(first, 0.5), Pane::new(second, 0.5)],
        }
    }

    pub fn direction(&self) -> SplitDirection {
        self.direction
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    /// Position of a pane in visual order.
    pub fn index_of(&self, id: PaneId) -> Option<usize> {
        self.panes.iter().position(|p| p.id == id)
    }

    pub fn get(&self, id: PaneId) -> Option<&Pane> {
        self.panes.iter().find(|p| p.id == id)
    }

    /// Append a pane for `terminal` at the end of the list.
    ///
    /// The new pane takes `1/(n+1)` of the container; every existing ratio
    /// is scaled by `n/(n+1)`, a proportional shrink that keeps the sum at 1
    /// without redistributing between neighbors. Returns `None` without
    /// mutating when the new pane's share, or any scaled survivor, would
    /// fall below `MIN_RATIO`.
    pub fn push(&mut self, terminal: TerminalId) -> Option<PaneId> {
        let n = self.panes.len() as f32;
        let scale = n / (n + 1.0);
        let share = 1.0 / (n + 1.0);
        let starved = share < MIN_RATIO - RATIO_EPSILON
            || self
                .panes
                .iter()
                .any(|p| p.ratio * scale < MIN_RATIO - RATIO_EPSILON);
        if starved {
            return None;
        }
        for pane in &mut self.panes {
            pane.ratio *= scale;
        }
        let pane = Pane::new(terminal, share);
        let id = pane.id;
        self.panes.push(pane);
        Some(id)
    }

    /// Remove the pane with the given id, rescaling every survivor by
    /// `1/(1-removed_ratio)` so the ratios sum to 1 again. Returns the
    /// removed pane, or `None` if the id is not present.
    pub fn remove(&mut self, id: PaneId) -> Option<Pane> {
        let index = self.index_of(id)?;
        let removed = self.panes.remove(index);
        let scale = 1.0 / (1.0 - removed.ratio);
        for pane in &mut self.panes {
            pane.ratio *= scale;
        }
        Some(removed)
    }

    /// Resize the pair of panes sharing the boundary between `boundary` and
    /// `boundary + 1`, evaluated against the ratios captured at drag start.
    ///
    /// The first pane's candidate ratio is clamped to
    /// `[MIN_RATIO, 1 - MIN_RATIO]` and the applied delta is taken from the
    /// second pane. If that would push the second pane below `MIN_RATIO`
    /// the whole move is rejected and nothing changes. Panes outside the
    /// pair are never touched, so the global sum is preserved.
    ///
    /// Returns whether the move was committed.
    pub fn drag_resize(
        &mut self,
        boundary: usize,
        start_first: f32,
        start_second: f32,
        delta_ratio: f32,
    ) -> bool {
        if boundary + 1 >= self.panes.len() {
            return false;
        }
        let candidate = (start_first + delta_ratio).clamp(MIN_RATIO, 1.0 - MIN_RATIO);
        let applied = candidate - start_first;
        let second = start_second - applied;
        if second < MIN_RATIO - RATIO_EPSILON {
            return false;
        }
        self.panes[boundary].ratio = candidate;
        self.panes[boundary + 1].ratio = second;
        true
    }

    /// Sum of all ratios; 1.0 within `RATIO_EPSILON` for a valid layout.
    pub fn ratio_sum(&self) -> f32 {
        self.panes.iter().map(|p| p.ratio).sum()
    }
}

/// What the container currently shows: one full-size terminal, or a
/// single-axis split.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMode {
    Single(TerminalId),
    Split(SplitLayout),
}
