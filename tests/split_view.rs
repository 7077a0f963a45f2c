//! End-to-end tests driving `SplitView` through its public API the way a
//! host application would: split, close, unsplit, keyboard focus, drags,
//! and the notification channel, plus property tests over operation
//! sequences.

use anyhow::Result;
use crossbeam_channel::{unbounded, Receiver};
use proptest::prelude::*;
use panemux::{
    ArrowKey, CreateError, KeyOutcome, Modifiers, PaneId, Rect, SplitDirection, SplitView,
    TerminalId, ViewEvent, ViewMode, MIN_RATIO, RATIO_EPSILON,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn term(n: u64) -> TerminalId {
    TerminalId(n)
}

fn pane(n: u64) -> PaneId {
    PaneId::from(term(n))
}

fn split_ok(view: &mut SplitView, direction: SplitDirection, n: u64) -> PaneId {
    view.split(direction, || Ok(term(n)))
        .expect("split should succeed")
}

fn ratios(view: &SplitView) -> Vec<f32> {
    match view.mode() {
        ViewMode::Single(_) => vec![1.0],
        ViewMode::Split(layout) => layout.panes().iter().map(|p| p.ratio).collect(),
    }
}

fn drain(rx: &Receiver<ViewEvent>) -> Vec<ViewEvent> {
    rx.try_iter().collect()
}

const BOUNDS: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1000.0,
    height: 800.0,
};

// ── Split lifecycle ──────────────────────────────────────────────────────

#[test]
fn repeated_same_axis_splits_divide_evenly() -> Result<()> {
    init_logs();
    let mut view = SplitView::new(term(1));
    split_ok(&mut view, SplitDirection::Horizontal, 2);
    split_ok(&mut view, SplitDirection::Horizontal, 3);
    split_ok(&mut view, SplitDirection::Horizontal, 4);

    let ratios = ratios(&view);
    assert_eq!(ratios.len(), 4);
    for r in ratios {
        assert!((r - 0.25).abs() < RATIO_EPSILON);
    }
    assert_eq!(view.active_pane(), pane(4));
    Ok(())
}

#[test]
fn axis_change_closes_everything_but_the_active_pane() -> Result<()> {
    init_logs();
    let (tx, rx) = unbounded();
    let mut view = SplitView::with_events(term(1), tx);
    split_ok(&mut view, SplitDirection::Horizontal, 2);
    split_ok(&mut view, SplitDirection::Horizontal, 3);
    view.set_active(pane(2));
    drain(&rx);

    split_ok(&mut view, SplitDirection::Vertical, 4);

    let ViewMode::Split(layout) = view.mode() else {
        panic!("expected split mode");
    };
    assert_eq!(layout.direction(), SplitDirection::Vertical);
    assert_eq!(layout.len(), 2);
    assert_eq!(layout.panes()[0].terminal, term(2));
    assert_eq!(layout.panes()[1].terminal, term(4));
    assert!((layout.panes()[0].ratio - 0.5).abs() < RATIO_EPSILON);

    let closed: Vec<_> = drain(&rx)
        .into_iter()
        .filter_map(|e| match e {
            ViewEvent::TerminalClosed(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(closed.len(), 2);
    assert!(closed.contains(&term(1)));
    assert!(closed.contains(&term(3)));
    Ok(())
}

#[test]
fn failed_creation_never_tears_down_panes() -> Result<()> {
    init_logs();
    let (tx, rx) = unbounded();
    let mut view = SplitView::with_events(term(1), tx);
    split_ok(&mut view, SplitDirection::Horizontal, 2);
    split_ok(&mut view, SplitDirection::Horizontal, 3);
    drain(&rx);
    let before = ratios(&view);

    // An axis change whose terminal never arrives must not flatten.
    let result = view.split(SplitDirection::Vertical, || {
        Err(CreateError("pty spawn failed".into()))
    });
    assert!(result.is_err());
    assert_eq!(ratios(&view), before);
    assert_eq!(view.pane_count(), 3);
    assert!(drain(&rx).is_empty());
    assert!(!view.split_pending());
    Ok(())
}

#[test]
fn split_is_refused_once_a_pane_sits_on_the_floor() -> Result<()> {
    init_logs();
    let (tx, rx) = unbounded();
    let mut view = SplitView::with_events(term(1), tx);
    split_ok(&mut view, SplitDirection::Horizontal, 2);

    // Drag the boundary until pane 0 rests on the 10% floor.
    assert!(view.begin_drag(0, 500.0, BOUNDS.width));
    assert!(view.drag_to(100.0));
    view.end_drag();
    let before = ratios(&view);
    assert!((before[0] - MIN_RATIO).abs() < RATIO_EPSILON);
    drain(&rx);

    // A third pane would scale pane 0 to 0.1 * 2/3; the split must be
    // refused whole rather than breach the floor.
    let result = view.split(SplitDirection::Horizontal, || Ok(term(3)));
    assert!(result.is_err());
    assert_eq!(ratios(&view), before);
    for r in ratios(&view) {
        assert!(r >= MIN_RATIO - RATIO_EPSILON);
    }
    // The unused session goes back to the registry for teardown.
    assert_eq!(drain(&rx), vec![ViewEvent::TerminalClosed(term(3))]);
    Ok(())
}

#[test]
fn a_pending_split_blocks_new_requests_until_completion() -> Result<()> {
    init_logs();
    let mut view = SplitView::new(term(1));
    view.request_split(SplitDirection::Horizontal)?;
    assert!(view.split_pending());
    assert!(view.request_split(SplitDirection::Vertical).is_err());

    view.complete_split(Ok(term(2)))?;
    assert!(!view.split_pending());
    assert_eq!(view.pane_count(), 2);

    // And a failed completion also clears the guard.
    view.request_split(SplitDirection::Horizontal)?;
    let _ = view.complete_split(Err(CreateError("no shell".into())));
    assert!(!view.split_pending());
    view.request_split(SplitDirection::Horizontal)?;
    Ok(())
}

// ── Close / unsplit ──────────────────────────────────────────────────────

#[test]
fn closing_panes_renormalizes_and_finally_dissolves() -> Result<()> {
    init_logs();
    let (tx, rx) = unbounded();
    let mut view = SplitView::with_events(term(1), tx);
    split_ok(&mut view, SplitDirection::Horizontal, 2);
    split_ok(&mut view, SplitDirection::Horizontal, 3);
    drain(&rx);

    assert!(view.close(pane(2)));
    let after = ratios(&view);
    assert_eq!(after.len(), 2);
    assert!((after.iter().sum::<f32>() - 1.0).abs() < RATIO_EPSILON);

    assert!(view.close(pane(1)));
    assert_eq!(*view.mode(), ViewMode::Single(term(3)));
    assert_eq!(view.active_terminal(), term(3));

    let closed: Vec<_> = drain(&rx)
        .into_iter()
        .filter(|e| matches!(e, ViewEvent::TerminalClosed(_)))
        .collect();
    assert_eq!(closed.len(), 2);
    Ok(())
}

#[test]
fn unsplit_maximizes_the_active_pane() -> Result<()> {
    init_logs();
    let (tx, rx) = unbounded();
    let mut view = SplitView::with_events(term(1), tx);
    split_ok(&mut view, SplitDirection::Vertical, 2);
    split_ok(&mut view, SplitDirection::Vertical, 3);
    view.set_active(pane(1));
    drain(&rx);

    assert!(view.unsplit());
    assert_eq!(*view.mode(), ViewMode::Single(term(1)));
    let events = drain(&rx);
    assert!(events.contains(&ViewEvent::TerminalClosed(term(2))));
    assert!(events.contains(&ViewEvent::TerminalClosed(term(3))));
    assert_eq!(events.len(), 2);
    Ok(())
}

// ── Keyboard navigation ──────────────────────────────────────────────────

#[test]
fn focus_walks_with_the_chord_and_clamps_at_the_edges() -> Result<()> {
    init_logs();
    let mut view = SplitView::new(term(1));
    split_ok(&mut view, SplitDirection::Horizontal, 2);
    split_ok(&mut view, SplitDirection::Horizontal, 3);

    // Active is the last pane; right clamps, left walks back to the first.
    assert_eq!(
        view.handle_key(ArrowKey::Right, Modifiers::ctrl_alt()),
        KeyOutcome::Ignored
    );
    assert_eq!(
        view.handle_key(ArrowKey::Left, Modifiers::ctrl_alt()),
        KeyOutcome::Handled
    );
    assert_eq!(
        view.handle_key(ArrowKey::Left, Modifiers::meta_alt()),
        KeyOutcome::Handled
    );
    assert_eq!(view.active_pane(), pane(1));
    assert_eq!(
        view.handle_key(ArrowKey::Left, Modifiers::ctrl_alt()),
        KeyOutcome::Ignored
    );
    assert_eq!(view.active_pane(), pane(1));
    Ok(())
}

#[test]
fn focus_change_notifies_the_host() -> Result<()> {
    init_logs();
    let (tx, rx) = unbounded();
    let mut view = SplitView::with_events(term(1), tx);
    split_ok(&mut view, SplitDirection::Horizontal, 2);
    drain(&rx);

    view.handle_key(ArrowKey::Left, Modifiers::ctrl_alt());
    assert_eq!(
        drain(&rx),
        vec![ViewEvent::ActivePaneChanged {
            pane: pane(1),
            terminal: term(1),
        }]
    );
    Ok(())
}

// ── Drag-resize through the pointer pipeline ─────────────────────────────

#[test]
fn pointer_drag_from_hit_test_to_release() -> Result<()> {
    init_logs();
    let mut view = SplitView::new(term(1));
    split_ok(&mut view, SplitDirection::Horizontal, 2);

    // Pointer-down near the divider at x=500.
    let boundary = view
        .divider_at(BOUNDS, (503.0, 400.0))
        .expect("divider under pointer");
    assert!(view.begin_drag(boundary, 503.0, BOUNDS.width));

    // Travel 10% of the container to the right.
    assert!(view.drag_to(603.0));
    view.end_drag();

    let after = ratios(&view);
    assert!((after[0] - 0.6).abs() < RATIO_EPSILON);
    assert!((after[1] - 0.4).abs() < RATIO_EPSILON);

    // The rendered rects follow the new ratios.
    let views = view.render(BOUNDS, |terminal, _| terminal);
    assert!((views[0].rect.width - 600.0).abs() < 0.5);
    assert!((views[1].rect.x - 600.0).abs() < 0.5);
    Ok(())
}

#[test]
fn drag_that_would_starve_a_neighbor_is_rejected_not_clamped() -> Result<()> {
    init_logs();
    let mut view = SplitView::new(term(1));
    split_ok(&mut view, SplitDirection::Horizontal, 2);
    split_ok(&mut view, SplitDirection::Horizontal, 3);
    let before = ratios(&view);

    assert!(view.begin_drag(0, 333.0, BOUNDS.width));
    // +30% would leave the middle pane at ~3%: the move must not commit.
    assert!(!view.drag_to(633.0));
    assert_eq!(ratios(&view), before);
    view.end_drag();
    Ok(())
}

// ── Property tests ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Split(bool),
    Close(usize),
    Drag(usize, f32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Split),
        any::<usize>().prop_map(Op::Close),
        (any::<usize>(), -1.0f32..1.0).prop_map(|(b, d)| Op::Drag(b, d)),
    ]
}

fn apply(view: &mut SplitView, next_terminal: &mut u64, op: &Op) {
    match op {
        Op::Split(horizontal) => {
            let direction = if *horizontal {
                SplitDirection::Horizontal
            } else {
                SplitDirection::Vertical
            };
            *next_terminal += 1;
            let terminal = TerminalId(*next_terminal);
            let _ = view.split(direction, || Ok(terminal));
        }
        Op::Close(selector) => {
            let target = match view.mode() {
                ViewMode::Split(layout) => Some(layout.panes()[selector % layout.len()].id),
                ViewMode::Single(_) => None,
            };
            if let Some(target) = target {
                view.close(target);
            }
        }
        Op::Drag(selector, delta) => {
            let extent = 1000.0;
            let boundary = match view.mode() {
                ViewMode::Split(layout) => selector % (layout.len() - 1),
                ViewMode::Single(_) => return,
            };
            if view.begin_drag(boundary, 0.0, extent) {
                view.drag_to(delta * extent);
                view.end_drag();
            }
        }
    }
}

proptest! {
    /// Ratios sum to 1 after any sequence of splits, closes, and drags.
    #[test]
    fn ratios_always_sum_to_one(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut view = SplitView::new(term(1));
        let mut next_terminal = 1;
        for op in &ops {
            apply(&mut view, &mut next_terminal, op);
            let sum: f32 = ratios(&view).iter().sum();
            prop_assert!((sum - 1.0).abs() < RATIO_EPSILON * ratios(&view).len() as f32);
        }
    }

    /// No pane ever drops below the minimum, whatever the operation mix:
    /// over-full splits are refused and floor-crossing drags rejected.
    #[test]
    fn no_ratio_ever_falls_below_the_minimum(
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut view = SplitView::new(term(1));
        let mut next_terminal = 1;
        for op in &ops {
            apply(&mut view, &mut next_terminal, op);
            for r in ratios(&view) {
                prop_assert!(r >= MIN_RATIO - RATIO_EPSILON, "ratio {r} below minimum");
            }
        }
    }

    /// A committed drag leaves both touched panes at or above the minimum.
    #[test]
    fn committed_drags_respect_the_minimum(
        panes in 2usize..6,
        boundary_selector in any::<usize>(),
        delta in -2.0f32..2.0,
    ) {
        let mut view = SplitView::new(term(1));
        for n in 2..=panes as u64 {
            let _ = view.split(SplitDirection::Horizontal, || Ok(term(n)));
        }
        let boundary = boundary_selector % (panes - 1);
        let extent = 1000.0;
        prop_assert!(view.begin_drag(boundary, 0.0, extent));
        let committed = view.drag_to(delta * extent);
        view.end_drag();

        let after = ratios(&view);
        if committed {
            prop_assert!(after[boundary] >= MIN_RATIO - RATIO_EPSILON);
            prop_assert!(after[boundary + 1] >= MIN_RATIO - RATIO_EPSILON);
        } else {
            // Rejected moves leave every ratio exactly as it was.
            for r in &after {
                prop_assert!((r - 1.0 / panes as f32).abs() < RATIO_EPSILON);
            }
        }
        let sum: f32 = after.iter().sum();
        prop_assert!((sum - 1.0).abs() < RATIO_EPSILON * panes as f32);
    }
}
