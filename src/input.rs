// Keyboard routing: the pane-navigation chord and axis-filtered arrow keys.
// Framework-free so any windowing layer can feed it.

use crate::layout::{SplitDirection, SplitLayout};

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        meta: false,
        shift: false,
    };

    pub fn ctrl_alt() -> Self {
        Self {
            ctrl: true,
            alt: true,
            ..Self::NONE
        }
    }

    pub fn meta_alt() -> Self {
        Self {
            meta: true,
            alt: true,
            ..Self::NONE
        }
    }

    /// The reserved pane-navigation chord: alt plus either ctrl or meta,
    /// so the same binding works across platforms. Shift disqualifies the
    /// chord, leaving shifted combinations free for the host.
    pub fn is_pane_nav_chord(&self) -> bool {
        self.alt && (self.ctrl || self.meta) && !self.shift
    }
}

/// Arrow keys, the only keys the layout manager reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

impl ArrowKey {
    /// The split axis this arrow navigates along.
    pub fn axis(&self) -> SplitDirection {
        match self {
            ArrowKey::Left | ArrowKey::Right => SplitDirection::Horizontal,
            ArrowKey::Up | ArrowKey::Down => SplitDirection::Vertical,
        }
    }

    fn toward_end(&self) -> bool {
        matches!(self, ArrowKey::Right | ArrowKey::Down)
    }
}

/// Whether a key event was consumed. `Handled` means the host should stop
/// propagation; `Ignored` lets the event pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

/// Compute the pane index an arrow key navigates to from `current`.
///
/// Arrows orthogonal to the layout axis are ignored, and navigation clamps
/// at the first and last pane instead of wrapping. Returns `Some(index)`
/// only when the index actually changes.
pub fn navigate(layout: &SplitLayout, current: usize, arrow: ArrowKey) -> Option<usize> {
    if arrow.axis() != layout.direction() {
        return None;
    }
    let next = if arrow.toward_end() {
        (current + 1).min(layout.len() - 1)
    } else {
        current.saturating_sub(1)
    };
    (next != current).then_some(next)
}
