// SplitView: the imperative surface of the layout manager. Owns the current
// mode and active pane, guards in-flight splits, drives drags, and emits
// one-way notifications to the host.

use crossbeam_channel::Sender;

use crate::config::Config;
use crate::drag::DragSession;
use crate::events::{EventSender, ViewEvent};
use crate::geometry::{self, DividerInfo, Rect};
use crate::input::{self, ArrowKey, KeyOutcome, Modifiers};
use crate::layout::{PaneId, SplitDirection, SplitLayout, TerminalId, ViewMode};

/// The asynchronous terminal-creation capability failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("terminal creation failed: {0}")]
pub struct CreateError(pub String);

/// Errors from the split operation. Everything else in this subsystem is a
/// silent no-op by design.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// A split request is already in flight; overlapping requests would race
    /// on the pane list, so the second one is refused outright.
    #[error("a split is already in flight")]
    SplitPending,
    /// `complete_split` was called with no matching `request_split`.
    #[error("no split request is pending")]
    NothingPending,
    /// Adding one more pane would shrink a pane below the minimum size;
    /// the layout is left unchanged and the created session is closed.
    #[error("no room for another pane above the minimum size")]
    NoRoom,
    #[error(transparent)]
    Create(#[from] CreateError),
}

/// One placed pane produced by [`SplitView::render`]: where it goes, whether
/// it is focused, and whatever the host's delegate rendered for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneView<R> {
    pub pane: PaneId,
    pub terminal: TerminalId,
    pub rect: Rect,
    pub focused: bool,
    pub content: R,
}

/// Split-pane container state: a single terminal at full size, or a flat
/// single-axis split. All mutations either produce a valid state or leave
/// the state untouched.
pub struct SplitView {
    mode: ViewMode,
    /// Tracked by id, not index, so it survives ratio-only mutations.
    active: PaneId,
    pending_split: Option<SplitDirection>,
    drag: Option<DragSession>,
    config: Config,
    events: EventSender,
}

impl SplitView {
    /// A view showing one terminal at full size, with no notifications.
    pub fn new(terminal: TerminalId) -> Self {
        Self {
            mode: ViewMode::Single(terminal),
            active: PaneId::from(terminal),
            pending_split: None,
            drag: None,
            config: Config::default(),
            events: EventSender::disabled(),
        }
    }

    /// Like [`SplitView::new`], but sending [`ViewEvent`]s to the host.
    pub fn with_events(terminal: TerminalId, tx: Sender<ViewEvent>) -> Self {
        Self {
            events: EventSender::new(tx),
            ..Self::new(terminal)
        }
    }

    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ── Read access ──────────────────────────────────────────────────

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn is_split(&self) -> bool {
        matches!(self.mode, ViewMode::Split(_))
    }

    pub fn active_pane(&self) -> PaneId {
        self.active
    }

    /// Terminal shown by the active pane (or the single terminal).
    pub fn active_terminal(&self) -> TerminalId {
        match &self.mode {
            ViewMode::Single(terminal) => *terminal,
            ViewMode::Split(layout) => match layout.get(self.active) {
                Some(pane) => pane.terminal,
                None => layout.panes()[0].terminal,
            },
        }
    }

    pub fn pane_count(&self) -> usize {
        match &self.mode {
            ViewMode::Single(_) => 1,
            ViewMode::Split(layout) => layout.len(),
        }
    }

    /// True while a split request waits for its terminal; the host should
    /// disable the split affordance in the meantime.
    pub fn split_pending(&self) -> bool {
        self.pending_split.is_some()
    }

    // ── Split ────────────────────────────────────────────────────────

    /// First half of a split: record the requested axis while the host asks
    /// the session factory for a new terminal. Refused while another split
    /// is in flight.
    pub fn request_split(&mut self, direction: SplitDirection) -> Result<(), SplitError> {
        if self.pending_split.is_some() {
            return Err(SplitError::SplitPending);
        }
        self.pending_split = Some(direction);
        Ok(())
    }

    /// Second half of a split: apply the factory's result.
    ///
    /// On creation failure the layout is left exactly as it was. On success:
    /// a single terminal becomes a two-pane 0.5/0.5 split; a same-axis split
    /// gains one pane at `1/(n+1)`; a different-axis split is flattened to a
    /// fresh two-pane split around the active pane, closing every other
    /// pane's session. The new pane becomes active.
    ///
    /// A same-axis split that would shrink any pane below the minimum size
    /// is refused with [`SplitError::NoRoom`]: the layout stays unchanged
    /// and the freshly created session is handed back for teardown via a
    /// close notification.
    pub fn complete_split(
        &mut self,
        created: Result<TerminalId, CreateError>,
    ) -> Result<PaneId, SplitError> {
        let direction = self.pending_split.take().ok_or(SplitError::NothingPending)?;
        let terminal = match created {
            Ok(terminal) => terminal,
            Err(e) => {
                log::warn!("pane creation failed, layout unchanged: {e}");
                return Err(SplitError::Create(e));
            }
        };
        match &mut self.mode {
            ViewMode::Single(current) => {
                let current = *current;
                self.mode = ViewMode::Split(SplitLayout::new(direction, current, terminal));
            }
            ViewMode::Split(layout) if layout.direction() == direction => {
                if layout.push(terminal).is_none() {
                    log::warn!("split refused: no room for another pane");
                    self.events.send(ViewEvent::TerminalClosed(terminal));
                    return Err(SplitError::NoRoom);
                }
            }
            ViewMode::Split(layout) => {
                // Axis change: flatten around the active pane instead of
                // nesting. Only reached after creation succeeded, so a
                // failed split never tears anything down.
                let survivor = match layout.get(self.active) {
                    Some(pane) => pane.terminal,
                    None => layout.panes()[0].terminal,
                };
                for pane in layout.panes() {
                    if pane.terminal != survivor {
                        self.events.send(ViewEvent::TerminalClosed(pane.terminal));
                    }
                }
                self.mode = ViewMode::Split(SplitLayout::new(direction, survivor, terminal));
            }
        }
        // A committed structural change invalidates the drag anchor.
        self.drag = None;
        let pane = PaneId::from(terminal);
        self.activate(pane, terminal);
        Ok(pane)
    }

    /// Request and complete a split in one call, for synchronous factories.
    pub fn split<F>(&mut self, direction: SplitDirection, create: F) -> Result<PaneId, SplitError>
    where
        F: FnOnce() -> Result<TerminalId, CreateError>,
    {
        self.request_split(direction)?;
        self.complete_split(create())
    }

    // ── Close / unsplit ──────────────────────────────────────────────

    /// Close a pane and its terminal session. No-op unless in split mode
    /// with the id present. Returns whether a pane was removed.
    pub fn close(&mut self, pane: PaneId) -> bool {
        let ViewMode::Split(layout) = &mut self.mode else {
            return false;
        };
        let Some(removed) = layout.remove(pane) else {
            return false;
        };
        self.drag = None;
        self.events.send(ViewEvent::TerminalClosed(removed.terminal));
        if layout.len() == 1 {
            // One survivor dissolves the split back to a full-size terminal.
            let survivor = layout.panes()[0];
            self.mode = ViewMode::Single(survivor.terminal);
            self.activate(survivor.id, survivor.terminal);
        } else if removed.id == self.active {
            // Activation moves to the first remaining pane in list order.
            let first = layout.panes()[0];
            self.activate(first.id, first.terminal);
        }
        true
    }

    /// Maximize the active pane: close every other pane's session and
    /// dissolve the split. No-op in single mode.
    pub fn unsplit(&mut self) -> bool {
        let ViewMode::Split(layout) = &self.mode else {
            return false;
        };
        let survivor = match layout.get(self.active) {
            Some(pane) => pane.terminal,
            None => layout.panes()[0].terminal,
        };
        for pane in layout.panes() {
            if pane.terminal != survivor {
                self.events.send(ViewEvent::TerminalClosed(pane.terminal));
            }
        }
        self.drag = None;
        self.mode = ViewMode::Single(survivor);
        self.activate(PaneId::from(survivor), survivor);
        true
    }

    // ── Focus ────────────────────────────────────────────────────────

    /// Make a pane active. Keyboard navigation and the host's click-to-focus
    /// both funnel through here. Returns whether the id exists.
    pub fn set_active(&mut self, pane: PaneId) -> bool {
        let terminal = match &self.mode {
            ViewMode::Single(terminal) if PaneId::from(*terminal) == pane => *terminal,
            ViewMode::Single(_) => return false,
            ViewMode::Split(layout) => match layout.get(pane) {
                Some(p) => p.terminal,
                None => return false,
            },
        };
        self.activate(pane, terminal);
        true
    }

    /// Route a key event. `Handled` means the host must suppress further
    /// propagation; `Ignored` passes the event through. Only meaningful for
    /// the globally focused container, which is the host's precondition.
    pub fn handle_key(&mut self, arrow: ArrowKey, modifiers: Modifiers) -> KeyOutcome {
        if !modifiers.is_pane_nav_chord() {
            return KeyOutcome::Ignored;
        }
        let ViewMode::Split(layout) = &self.mode else {
            return KeyOutcome::Ignored;
        };
        let Some(current) = layout.index_of(self.active) else {
            return KeyOutcome::Ignored;
        };
        let Some(next) = input::navigate(layout, current, arrow) else {
            return KeyOutcome::Ignored;
        };
        let pane = layout.panes()[next];
        self.activate(pane.id, pane.terminal);
        KeyOutcome::Handled
    }

    fn activate(&mut self, pane: PaneId, terminal: TerminalId) {
        if self.active != pane {
            self.active = pane;
            self.events
                .send(ViewEvent::ActivePaneChanged { pane, terminal });
        }
    }

    // ── Drag-resize ──────────────────────────────────────────────────

    /// Start a drag on the boundary between panes `boundary` and
    /// `boundary + 1`. `coord` and `extent` are the pointer position and
    /// container size along the split axis. Returns false (and changes
    /// nothing) if a drag is already active, the view is not split, or the
    /// boundary is invalid.
    pub fn begin_drag(&mut self, boundary: usize, coord: f32, extent: f32) -> bool {
        if self.drag.is_some() {
            log::debug!("drag request ignored: a drag is already active");
            return false;
        }
        let ViewMode::Split(layout) = &self.mode else {
            return false;
        };
        match DragSession::begin(layout, boundary, coord, extent) {
            Some(session) => {
                self.drag = Some(session);
                true
            }
            None => false,
        }
    }

    /// Feed one pointer-move event to the active drag. Returns whether the
    /// move was committed.
    pub fn drag_to(&mut self, coord: f32) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        match &mut self.mode {
            ViewMode::Split(layout) => drag.apply(layout, coord),
            ViewMode::Single(_) => false,
        }
    }

    /// Pointer released: end the drag. No snapping, no inertia.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn drag_active(&self) -> bool {
        self.drag.is_some()
    }

    // ── Rendering / hit-testing ──────────────────────────────────────

    /// Place every pane inside `bounds` and run the host's rendering
    /// delegate for each; the layout manager never draws anything itself.
    pub fn render<R>(
        &self,
        bounds: Rect,
        mut render_pane: impl FnMut(TerminalId, bool) -> R,
    ) -> Vec<PaneView<R>> {
        match &self.mode {
            ViewMode::Single(terminal) => {
                let terminal = *terminal;
                vec![PaneView {
                    pane: PaneId::from(terminal),
                    terminal,
                    rect: bounds,
                    focused: true,
                    content: render_pane(terminal, true),
                }]
            }
            ViewMode::Split(layout) => layout
                .panes()
                .iter()
                .zip(geometry::pane_rects(layout, bounds))
                .map(|(pane, (_, rect))| {
                    let focused = pane.id == self.active;
                    PaneView {
                        pane: pane.id,
                        terminal: pane.terminal,
                        rect,
                        focused,
                        content: render_pane(pane.terminal, focused),
                    }
                })
                .collect(),
        }
    }

    /// Divider bars for the host's pointer layer; empty in single mode.
    pub fn dividers(&self, bounds: Rect) -> Vec<DividerInfo> {
        match &self.mode {
            ViewMode::Single(_) => Vec::new(),
            ViewMode::Split(layout) => {
                geometry::divider_rects(layout, bounds, self.config.divider.width)
            }
        }
    }

    /// Boundary index of the divider under the pointer, if any.
    pub fn divider_at(&self, bounds: Rect, point: (f32, f32)) -> Option<usize> {
        geometry::hit_test_divider(point, &self.dividers(bounds), self.config.divider.hit_margin)
    }

    /// Pane under the pointer, for click-to-focus.
    pub fn pane_at(&self, bounds: Rect, point: (f32, f32)) -> Option<PaneId> {
        match &self.mode {
            ViewMode::Single(terminal) => bounds
                .contains_point(point.0, point.1)
                .then(|| PaneId::from(*terminal)),
            ViewMode::Split(layout) => geometry::pane_at(layout, bounds, point),
        }
    }
}
