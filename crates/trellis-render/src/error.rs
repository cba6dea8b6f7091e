use thiserror::Error;
use trellis_tree::{TreePath, WidgetIdentity};

/// Result type for patch application.
pub type Result<T> = std::result::Result<T, PatchError>;

/// Errors raised while applying a patch set against a retained target.
///
/// These indicate a caller error: applying a patch against a target it was
/// not diffed for, or applying the same patch set twice.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("patch path {path} does not resolve to a node")]
    PathNotFound { path: TreePath },

    #[error("node at {path} does not match the patch op (expected {expected})")]
    NodeMismatch {
        path: TreePath,
        expected: &'static str,
    },

    #[error("child index {index} is out of bounds at {path}")]
    IndexOutOfBounds { path: TreePath, index: u32 },

    #[error("widget {identity} is not live in the registry")]
    UnknownWidget { identity: WidgetIdentity },
}
