//! Immutable view-tree values for Trellis.
//!
//! A view tree describes one rendering frame. It is never mutated; a new
//! frame is a new tree, and [`diff`] computes the patch set that turns the
//! previous frame's render target into the next one's.

pub mod diff;
pub mod html;
pub mod identity;
pub mod props;
pub mod snapshot;
pub mod widget;

pub use diff::{diff, Patch, PatchOp, TreePath};
pub use html::{Element, Html};
pub use identity::WidgetIdentity;
pub use props::{EventHook, EventPayload, Prop, PropValue, Props};
pub use snapshot::{summarize, TreeSummary};
pub use widget::{Lifecycle, LifecycleFns, Responder, Widget, WidgetState, WidgetTarget};
