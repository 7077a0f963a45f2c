// One-way notifications from the layout manager to the host: terminal-close
// requests for the session registry and active-pane changes for sibling UI.

use crossbeam_channel::Sender;

use crate::layout::{PaneId, TerminalId};

/// Notification emitted by the layout manager. Sends are fire-and-forget:
/// the manager never waits for the host and never rolls back on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// The pane for this terminal is gone; the session registry should tear
    /// the session down. Not verified — if the registry stops listening the
    /// session leaks.
    TerminalClosed(TerminalId),
    /// A different pane became active (tab bar / title sync).
    ActivePaneChanged {
        pane: PaneId,
        terminal: TerminalId,
    },
}

/// Optional event channel wrapper. A view without a sender simply drops
/// notifications.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventSender {
    tx: Option<Sender<ViewEvent>>,
}

impl EventSender {
    pub(crate) fn disabled() -> Self {
        Self { tx: None }
    }

    pub(crate) fn new(tx: Sender<ViewEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub(crate) fn send(&self, event: ViewEvent) {
        if let Some(tx) = &self.tx {
            if tx.send(event).is_err() {
                log::warn!("event receiver disconnected, dropping {event:?}");
            }
        }
    }
}
