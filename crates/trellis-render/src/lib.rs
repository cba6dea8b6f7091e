//! Retained rendering for Trellis.
//!
//! A [`Renderer`] materializes view trees into retained [`Node`] targets,
//! applies patch sets against them and dispatches the widget lifecycle
//! protocol through a keyed registry: init on first appearance, update on
//! every persisting render, destroy on removal.

pub mod error;
pub mod events;
pub mod node;
pub mod registry;
pub mod renderer;

pub use error::PatchError;
pub use events::fire;
pub use node::{summarize_node, Node};
pub use registry::WidgetRegistry;
pub use renderer::Renderer;
