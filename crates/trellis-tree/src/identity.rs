use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identity of a widget instance across renders.
///
/// Two widget values denote the same live instance iff both `name` and `id`
/// match. The diff layer uses this pair to decide between updating a
/// persisting instance and replacing it with a fresh one.
///
/// `id` must be unique among live widgets of the same `name` within one
/// render tree at one time. A collision is a programming error: it is not
/// detected, and lifecycle calls will be dispatched to the wrong instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetIdentity {
    pub name: Arc<str>,
    pub id: Arc<str>,
}

impl WidgetIdentity {
    pub fn new(name: impl Into<Arc<str>>, id: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// Mint an identity with a freshly generated unique id.
    pub fn fresh(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, Ulid::new().to_string())
    }
}

impl fmt::Display for WidgetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}
