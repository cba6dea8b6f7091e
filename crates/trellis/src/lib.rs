//! Composable UI components over a retained render tree.
//!
//! A [`Component`] wraps a signal function from requests to view trees
//! whose actions yield either a private message (looped back into the
//! component by the driver) or a public response. Components compose via
//! [`combine`], [`Component::dimap`], [`Component::map_placeholder`] and
//! [`Component::hoist`] without ever exposing their private message
//! types. The companion crates render views into retained targets
//! (`trellis-render`) and reconcile successive frames (`trellis-tree`).

pub mod component;
pub mod context;
pub mod routing;
pub mod sf;
pub mod testing;
pub mod widget;

pub use either::Either;
pub use trellis_render as render;
pub use trellis_tree as tree;

pub use component::{
    combine, run_component, Component, ComponentSf, NestUnder, PrivateMsg, ViewMerge,
};
pub use context::{
    Context, ContextTransform, Deferred, Evaluate, Pure, RunContext, Suspend, Thunk,
};
pub use sf::Sf1;
pub use widget::{widget, WidgetResponder, WidgetSpec};
