use std::marker::PhantomData;
use std::mem;

use futures_channel::mpsc;
use tracing::debug;
use trellis_tree::{Html, Patch, PatchOp, Prop, Responder, TreePath};

use crate::error::{PatchError, Result};
use crate::node::Node;
use crate::registry::WidgetRegistry;

/// Materializes view trees and applies patch sets against retained targets.
///
/// Actions emitted asynchronously by widgets (through their responder) and
/// synchronously by patching (hook attach/detach) land in an internal
/// unbounded queue the driver drains between feeds.
pub struct Renderer<P, A> {
    registry: WidgetRegistry,
    actions_tx: mpsc::UnboundedSender<A>,
    actions_rx: mpsc::UnboundedReceiver<A>,
    _placeholder: PhantomData<P>,
}

impl<P, A> Default for Renderer<P, A>
where
    P: Clone + 'static,
    A: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, A> Renderer<P, A>
where
    P: Clone + 'static,
    A: Clone + 'static,
{
    pub fn new() -> Self {
        let (actions_tx, actions_rx) = mpsc::unbounded();
        Self {
            registry: WidgetRegistry::new(),
            actions_tx,
            actions_rx,
            _placeholder: PhantomData,
        }
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// A responder feeding this renderer's action queue.
    pub fn responder(&self) -> Responder<A> {
        let tx = self.actions_tx.clone();
        Responder::new(move |action| {
            let _ = tx.unbounded_send(action);
        })
    }

    /// Take all actions queued since the last drain.
    pub fn drain_actions(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(Some(action)) = self.actions_rx.try_next() {
            actions.push(action);
        }
        actions
    }

    /// Materialize a tree with no prior render target (first render).
    ///
    /// Runs `init` for every widget leaf and queues attach actions for
    /// every installed hook that carries one.
    pub fn create_element(&mut self, tree: &Html<P, A>) -> Node<P, A> {
        debug!("materializing initial render target");
        self.materialize(tree)
    }

    /// Apply a patch set, returning the (possibly replaced) target.
    ///
    /// Must be called exactly once per patch set, against the target the
    /// patch was diffed for; re-application is undefined and will usually
    /// surface as a [`PatchError`].
    pub fn apply(&mut self, patch: Patch<P, A>, mut root: Node<P, A>) -> Result<Node<P, A>> {
        debug!(ops = patch.len(), "applying patch");
        for op in patch.into_ops() {
            match op {
                PatchOp::Replace { path, tree } => {
                    if path.is_root() {
                        self.destroy_node(root)?;
                        root = self.materialize(&tree);
                    } else {
                        let (parent_path, index) = path.split_last().expect("non-root path");
                        let children = self.element_children(&mut root, &parent_path)?;
                        let slot = index as usize;
                        if slot >= children.len() {
                            return Err(PatchError::IndexOutOfBounds {
                                path: parent_path,
                                index,
                            });
                        }
                        let old = mem::replace(&mut children[slot], Node::Text("".into()));
                        self.destroy_node(old)?;
                        let node = self.materialize(&tree);
                        let children = self.element_children(&mut root, &parent_path)?;
                        children[index as usize] = node;
                    }
                }
                PatchOp::SetText { path, text } => {
                    match resolve_mut(&mut root, &path)? {
                        Node::Text(slot) => *slot = text,
                        _ => {
                            return Err(PatchError::NodeMismatch {
                                path,
                                expected: "text leaf",
                            });
                        }
                    }
                }
                PatchOp::SetPlaceholder { path, value } => {
                    match resolve_mut(&mut root, &path)? {
                        Node::Placeholder(slot) => *slot = value,
                        _ => {
                            return Err(PatchError::NodeMismatch {
                                path,
                                expected: "placeholder leaf",
                            });
                        }
                    }
                }
                PatchOp::PatchProps { path, set, remove } => {
                    let mut pending = Vec::new();
                    {
                        let props = match resolve_mut(&mut root, &path)? {
                            Node::Element { props, .. } => props,
                            _ => {
                                return Err(PatchError::NodeMismatch {
                                    path,
                                    expected: "element node",
                                });
                            }
                        };
                        for key in remove {
                            if let Some(Prop::Hook(hook)) = props.remove(&key) {
                                if let Some(detach) = hook.detach {
                                    pending.push(detach);
                                }
                            }
                        }
                        for (key, prop) in set {
                            let new_hook_attach = match &prop {
                                Prop::Hook(hook) => Some(hook.attach.clone()),
                                Prop::Value(_) => None,
                            };
                            match (props.insert(key, prop), new_hook_attach) {
                                // hook replaced by hook: callback swap, no actions
                                (Some(Prop::Hook(_)), Some(_)) => {}
                                (Some(Prop::Hook(old)), None) => {
                                    if let Some(detach) = old.detach {
                                        pending.push(detach);
                                    }
                                }
                                (_, Some(Some(attach))) => pending.push(attach),
                                _ => {}
                            }
                        }
                    }
                    for action in pending {
                        self.queue(action);
                    }
                }
                PatchOp::RemoveChild { path, index } => {
                    let children = self.element_children(&mut root, &path)?;
                    let slot = index as usize;
                    if slot >= children.len() {
                        return Err(PatchError::IndexOutOfBounds { path, index });
                    }
                    let removed = children.remove(slot);
                    self.destroy_node(removed)?;
                }
                PatchOp::InsertChild { path, index, tree } => {
                    let node = self.materialize(&tree);
                    let children = self.element_children(&mut root, &path)?;
                    let slot = index as usize;
                    if slot > children.len() {
                        return Err(PatchError::IndexOutOfBounds { path, index });
                    }
                    children.insert(slot, node);
                }
                PatchOp::UpdateWidget { path, widget } => {
                    match resolve_mut(&mut root, &path)? {
                        Node::Widget(slot) => {
                            self.registry.update(&widget)?;
                            // Keep the latest leaf so a later destroy uses
                            // the lifecycle the instance last rendered with.
                            *slot = widget;
                        }
                        _ => {
                            return Err(PatchError::NodeMismatch {
                                path,
                                expected: "widget leaf",
                            });
                        }
                    }
                }
            }
        }
        Ok(root)
    }

    /// Tear down a whole target, destroying every live widget in it.
    pub fn unmount(&mut self, root: Node<P, A>) -> Result<()> {
        self.destroy_node(root)
    }

    fn materialize(&mut self, tree: &Html<P, A>) -> Node<P, A> {
        match tree {
            Html::Text(text) => Node::Text(text.clone()),
            Html::Placeholder(value) => Node::Placeholder(value.clone()),
            Html::Widget(widget) => {
                self.registry.init(widget, self.responder());
                Node::Widget(widget.clone())
            }
            Html::Element(element) => {
                for (_, prop) in element.props.iter() {
                    if let Prop::Hook(hook) = prop {
                        if let Some(attach) = &hook.attach {
                            self.queue(attach.clone());
                        }
                    }
                }
                Node::Element {
                    tag: element.tag.clone(),
                    props: element.props.clone(),
                    children: element
                        .children
                        .iter()
                        .map(|child| self.materialize(child))
                        .collect(),
                }
            }
        }
    }

    fn destroy_node(&mut self, node: Node<P, A>) -> Result<()> {
        match node {
            Node::Text(_) | Node::Placeholder(_) => Ok(()),
            Node::Widget(widget) => self.registry.destroy(&widget),
            Node::Element {
                props, children, ..
            } => {
                for (_, prop) in props.iter() {
                    if let Prop::Hook(hook) = prop {
                        if let Some(detach) = &hook.detach {
                            self.queue(detach.clone());
                        }
                    }
                }
                for child in children {
                    self.destroy_node(child)?;
                }
                Ok(())
            }
        }
    }

    fn element_children<'n>(
        &mut self,
        root: &'n mut Node<P, A>,
        path: &TreePath,
    ) -> Result<&'n mut Vec<Node<P, A>>> {
        match resolve_mut(root, path)? {
            Node::Element { children, .. } => Ok(children),
            _ => Err(PatchError::NodeMismatch {
                path: path.clone(),
                expected: "element node",
            }),
        }
    }

    fn queue(&self, action: A) {
        let _ = self.actions_tx.unbounded_send(action);
    }
}

fn resolve_mut<'n, P, A>(root: &'n mut Node<P, A>, path: &TreePath) -> Result<&'n mut Node<P, A>> {
    root.resolve_mut(path).ok_or_else(|| PatchError::PathNotFound {
        path: path.clone(),
    })
}
