//! Pure structural diff between two view trees.
//!
//! The result is an ordered patch set addressed by child paths. Widget
//! leaves are compared by identity `(name, id)` only: a matching identity
//! produces an update op, a differing one a replacement. The diff never
//! descends into a widget's internals.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::html::Html;
use crate::props::{prop_unchanged, Prop, Props};
use crate::widget::Widget;

/// Address of a node: child indices from the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TreePath(SmallVec<[u32; 8]>);

impl TreePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: u32) -> Self {
        let mut segments = self.0.clone();
        segments.push(index);
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[u32] {
        &self.0
    }

    /// Split into parent path and final child index; `None` at the root.
    pub fn split_last(&self) -> Option<(TreePath, u32)> {
        let (&last, parent) = self.0.split_last()?;
        Some((Self(SmallVec::from_slice(parent)), last))
    }
}

impl From<&[u32]> for TreePath {
    fn from(segments: &[u32]) -> Self {
        Self(SmallVec::from_slice(segments))
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// One edit in a patch set.
#[derive(Debug)]
pub enum PatchOp<P, A> {
    /// Replace the node at `path` with a freshly materialized tree.
    Replace { path: TreePath, tree: Html<P, A> },
    /// Set the text of the text leaf at `path`.
    SetText { path: TreePath, text: Arc<str> },
    /// Set the value of the placeholder leaf at `path`.
    SetPlaceholder { path: TreePath, value: P },
    /// Apply per-key prop changes to the element at `path`.
    PatchProps {
        path: TreePath,
        set: Vec<(Arc<str>, Prop<A>)>,
        remove: Vec<Arc<str>>,
    },
    /// Remove the child at `index` of the element at `path`.
    RemoveChild { path: TreePath, index: u32 },
    /// Insert a freshly materialized tree at `index` of the element at `path`.
    InsertChild {
        path: TreePath,
        index: u32,
        tree: Html<P, A>,
    },
    /// Run the identity-matched widget update at `path` with the new leaf.
    UpdateWidget { path: TreePath, widget: Widget<A> },
}

/// An ordered set of edits turning one render target into another.
///
/// Application order matters: within a parent, removals precede
/// insertions, so destroy callbacks for removed widgets are dispatched
/// before init callbacks for inserted ones. Reusing an exact widget
/// identity across a remove and an add inside one patch is unsupported;
/// a persisting identity must appear as a single update.
#[derive(Debug)]
pub struct Patch<P, A> {
    ops: SmallVec<[PatchOp<P, A>; 4]>,
}

impl<P, A> Patch<P, A> {
    pub fn ops(&self) -> &[PatchOp<P, A>] {
        &self.ops
    }

    pub fn into_ops(self) -> SmallVec<[PatchOp<P, A>; 4]> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Structural comparison of two frames.
pub fn diff<P, A>(prev: &Html<P, A>, next: &Html<P, A>) -> Patch<P, A>
where
    P: Clone + PartialEq + 'static,
    A: Clone + 'static,
{
    let mut ops = SmallVec::new();
    diff_at(TreePath::root(), prev, next, &mut ops);
    Patch { ops }
}

fn diff_at<P, A>(
    path: TreePath,
    prev: &Html<P, A>,
    next: &Html<P, A>,
    ops: &mut SmallVec<[PatchOp<P, A>; 4]>,
) where
    P: Clone + PartialEq + 'static,
    A: Clone + 'static,
{
    match (prev, next) {
        (Html::Text(prev_text), Html::Text(next_text)) => {
            if prev_text != next_text {
                ops.push(PatchOp::SetText {
                    path,
                    text: next_text.clone(),
                });
            }
        }
        (Html::Placeholder(prev_value), Html::Placeholder(next_value)) => {
            if prev_value != next_value {
                ops.push(PatchOp::SetPlaceholder {
                    path,
                    value: next_value.clone(),
                });
            }
        }
        (Html::Widget(prev_widget), Html::Widget(next_widget)) => {
            if prev_widget.same_instance(next_widget) {
                // The update runs on every render where the identity
                // persists; the new leaf carries the lifecycle to call.
                ops.push(PatchOp::UpdateWidget {
                    path,
                    widget: next_widget.clone(),
                });
            } else {
                ops.push(PatchOp::Replace {
                    path,
                    tree: next.clone(),
                });
            }
        }
        (Html::Element(prev_el), Html::Element(next_el)) if prev_el.tag == next_el.tag => {
            let (set, remove) = diff_props(&prev_el.props, &next_el.props);
            if !set.is_empty() || !remove.is_empty() {
                ops.push(PatchOp::PatchProps { path: path.clone(), set, remove });
            }

            let shared = prev_el.children.len().min(next_el.children.len());
            for index in 0..shared {
                diff_at(
                    path.child(index as u32),
                    &prev_el.children[index],
                    &next_el.children[index],
                    ops,
                );
            }
            match prev_el.children.len().cmp(&next_el.children.len()) {
                Ordering::Greater => {
                    for index in (shared..prev_el.children.len()).rev() {
                        ops.push(PatchOp::RemoveChild {
                            path: path.clone(),
                            index: index as u32,
                        });
                    }
                }
                Ordering::Less => {
                    for index in shared..next_el.children.len() {
                        ops.push(PatchOp::InsertChild {
                            path: path.clone(),
                            index: index as u32,
                            tree: next_el.children[index].clone(),
                        });
                    }
                }
                Ordering::Equal => {}
            }
        }
        _ => {
            ops.push(PatchOp::Replace {
                path,
                tree: next.clone(),
            });
        }
    }
}

fn diff_props<A: Clone>(
    prev: &Props<A>,
    next: &Props<A>,
) -> (Vec<(Arc<str>, Prop<A>)>, Vec<Arc<str>>) {
    let mut set = Vec::new();
    for (key, prop) in next.iter() {
        let unchanged = prev.get(key).is_some_and(|old| prop_unchanged(old, prop));
        if !unchanged {
            set.push((key.clone(), prop.clone()));
        }
    }
    let remove = prev
        .keys()
        .filter(|key| next.get(key).is_none())
        .cloned()
        .collect();
    (set, remove)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::WidgetIdentity;
    use crate::widget::{LifecycleFns, Responder};
    use std::rc::Rc;

    type Tree = Html<&'static str, u32>;

    fn noop_widget(name: &str, id: &str) -> Widget<u32> {
        Widget::new(
            WidgetIdentity::new(name.to_string(), id.to_string()),
            Rc::new(LifecycleFns {
                init: Rc::new(|_: Responder<u32>| ((), ())),
                update: Rc::new(|_: &mut (), _: &mut ()| None),
                destroy: Rc::new(|_: (), _: ()| {}),
            }),
        )
    }

    #[test]
    fn identical_trees_produce_empty_patch() {
        let tree: Tree = Html::element(
            "div",
            Props::new().with_value("class", "row"),
            vec![Html::text("a"), Html::placeholder("p")],
        );
        assert!(diff(&tree, &tree.clone()).is_empty());
    }

    #[test]
    fn text_change_is_a_set_text() {
        let prev: Tree = Html::element("div", Props::new(), vec![Html::text("a")]);
        let next: Tree = Html::element("div", Props::new(), vec![Html::text("b")]);

        let patch = diff(&prev, &next);
        assert_eq!(patch.len(), 1);
        assert!(matches!(
            &patch.ops()[0],
            PatchOp::SetText { path, text }
                if path.segments() == [0] && text.as_ref() == "b"
        ));
    }

    #[test]
    fn tag_change_replaces_subtree() {
        let prev: Tree = Html::element("div", Props::new(), vec![]);
        let next: Tree = Html::element("span", Props::new(), vec![]);

        let patch = diff(&prev, &next);
        assert_eq!(patch.len(), 1);
        assert!(matches!(
            &patch.ops()[0],
            PatchOp::Replace { path, .. } if path.is_root()
        ));
    }

    #[test]
    fn tail_removals_run_in_reverse_index_order() {
        let prev: Tree = Html::element(
            "div",
            Props::new(),
            vec![Html::text("a"), Html::text("b"), Html::text("c")],
        );
        let next: Tree = Html::element("div", Props::new(), vec![Html::text("a")]);

        let patch = diff(&prev, &next);
        let indices: Vec<u32> = patch
            .ops()
            .iter()
            .map(|op| match op {
                PatchOp::RemoveChild { index, .. } => *index,
                other => panic!("unexpected op {other:?}"),
            })
            .collect();
        // Tail removals run highest index first so earlier ones stay valid.
        assert_eq!(indices, vec![2, 1]);
    }

    #[test]
    fn widget_identity_match_updates_and_mismatch_replaces() {
        let prev: Tree = Html::widget(noop_widget("timer", "t1"));
        let persisting: Tree = Html::widget(noop_widget("timer", "t1"));
        let replaced: Tree = Html::widget(noop_widget("timer", "t2"));

        let update = diff(&prev, &persisting);
        assert!(matches!(update.ops()[0], PatchOp::UpdateWidget { .. }));

        let replace = diff(&prev, &replaced);
        assert!(matches!(replace.ops()[0], PatchOp::Replace { .. }));
    }

    #[test]
    fn prop_diff_sets_and_removes_per_key() {
        let prev: Tree = Html::element(
            "div",
            Props::new().with_value("a", 1.0).with_value("b", 2.0),
            vec![],
        );
        let next: Tree = Html::element(
            "div",
            Props::new().with_value("a", 9.0).with_value("c", 3.0),
            vec![],
        );

        let patch = diff(&prev, &next);
        let PatchOp::PatchProps { set, remove, .. } = &patch.ops()[0] else {
            panic!("expected prop patch");
        };
        let set_keys: Vec<&str> = set.iter().map(|(key, _)| key.as_ref()).collect();
        assert_eq!(set_keys, vec!["a", "c"]);
        assert_eq!(remove.len(), 1);
        assert_eq!(remove[0].as_ref(), "b");
    }
}
