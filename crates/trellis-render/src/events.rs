//! Firing event hooks against a retained target.

use trellis_tree::{EventPayload, Prop, TreePath};

use crate::node::Node;

/// Run the event hook stored under `key` on the element at `path`.
///
/// Returns the action the hook produced, or `None` when the path does not
/// resolve to an element carrying a hook under that key. The caller (the
/// driver) is responsible for routing the action.
pub fn fire<P, A>(
    root: &Node<P, A>,
    path: &TreePath,
    key: &str,
    payload: EventPayload,
) -> Option<A> {
    let props = root.resolve(path)?.props()?;
    match props.get(key)? {
        Prop::Hook(hook) => Some(hook.run(payload)),
        Prop::Value(_) => None,
    }
}
