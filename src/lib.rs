// panemux: a split-pane layout manager for terminal containers. Owns pane
// arrangement, focus, and resize state; terminal sessions and drawing stay
// with the host.

pub mod config;
pub mod drag;
pub mod events;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod view;

pub use config::{Config, ConfigError, DividerConfig};
pub use drag::DragSession;
pub use events::ViewEvent;
pub use geometry::{DividerInfo, Rect, DIVIDER_WIDTH, HIT_TEST_MARGIN};
pub use input::{ArrowKey, KeyOutcome, Modifiers};
pub use layout::{
    Pane, PaneId, SplitDirection, SplitLayout, TerminalId, ViewMode, MIN_RATIO, RATIO_EPSILON,
};
pub use view::{CreateError, PaneView, SplitError, SplitView};
