//! User interface for the craps table
//!
//! - `component`: the owning component tree and the `Component` trait
//! - `events`: every event subsystems exchange
//! - `dispatch`: the FIFO event bus that drains cascades to quiescence
//! - `widgets`: render descriptions handed to front-ends
//! - `tui`: terminal front-end (feature `ui`)

pub mod component;
pub mod dispatch;
pub mod events;
pub mod widgets;

#[cfg(feature = "ui")]
pub mod tui;

pub use component::{Component, ComponentTree, Container, NodeContext, NodeId, Pos, Rect};
pub use dispatch::{DispatchReport, EventBus};
pub use events::{PointerKind, TableEvent};
pub use widgets::Widget;
