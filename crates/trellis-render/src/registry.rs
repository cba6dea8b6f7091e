//! Keyed registry of live widget instances.
//!
//! The registry is the authority on which `(name, id)` identities are
//! currently live, and it owns the opaque state/target pair each instance
//! threads between lifecycle calls. Patch application drives it:
//! membership gained dispatches `init`, membership retained dispatches
//! `update`, membership lost dispatches `destroy`.

use std::collections::HashMap;

use tracing::debug;
use trellis_tree::{Responder, Widget, WidgetIdentity, WidgetState, WidgetTarget};

use crate::error::{PatchError, Result};

struct LiveWidget {
    state: WidgetState,
    target: WidgetTarget,
}

/// Map from widget identity to its live record.
#[derive(Default)]
pub struct WidgetRegistry {
    live: HashMap<WidgetIdentity, LiveWidget>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `init` for a freshly appearing instance and record it.
    ///
    /// An identity collision (two live widgets sharing `(name, id)`) is a
    /// programming error: the colliding record overwrites the previous one
    /// and lifecycle calls are misdirected from then on.
    pub fn init<A>(&mut self, widget: &Widget<A>, responder: Responder<A>) {
        debug!(identity = %widget.identity(), "widget init");
        let (state, target) = widget.lifecycle().init(responder);
        self.live
            .insert(widget.identity().clone(), LiveWidget { state, target });
    }

    /// Run `update` for a persisting instance, using the new leaf's
    /// lifecycle and the recorded state/target.
    pub fn update<A>(&mut self, widget: &Widget<A>) -> Result<()> {
        let record = self
            .live
            .get_mut(widget.identity())
            .ok_or_else(|| PatchError::UnknownWidget {
                identity: widget.identity().clone(),
            })?;
        debug!(identity = %widget.identity(), "widget update");
        if let Some(replacement) = widget
            .lifecycle()
            .update(&mut record.state, &mut record.target)
        {
            record.target = replacement;
        }
        Ok(())
    }

    /// Run `destroy` for a removed instance and forget it.
    pub fn destroy<A>(&mut self, widget: &Widget<A>) -> Result<()> {
        let record = self
            .live
            .remove(widget.identity())
            .ok_or_else(|| PatchError::UnknownWidget {
                identity: widget.identity().clone(),
            })?;
        debug!(identity = %widget.identity(), "widget destroy");
        widget.lifecycle().destroy(record.state, record.target);
        Ok(())
    }

    pub fn is_live(&self, identity: &WidgetIdentity) -> bool {
        self.live.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
