use std::sync::Arc;

use trellis_tree::{Prop, Props, TreePath, TreeSummary, Widget};

/// The live, mutable object a view tree is realized into.
///
/// Widget leaves hold only the widget handle; the target an instance
/// returned from `init` is owned by the registry, because it is managed by
/// the external object rather than by the framework.
#[derive(Debug)]
pub enum Node<P, A> {
    Text(Arc<str>),
    Element {
        tag: Arc<str>,
        props: Props<A>,
        children: Vec<Node<P, A>>,
    },
    Placeholder(P),
    Widget(Widget<A>),
}

impl<P, A> Node<P, A> {
    /// Resolve a path to a node, walking element children.
    pub fn resolve(&self, path: &TreePath) -> Option<&Node<P, A>> {
        let mut node = self;
        for &segment in path.segments() {
            match node {
                Node::Element { children, .. } => {
                    node = children.get(segment as usize)?;
                }
                _ => return None,
            }
        }
        Some(node)
    }

    pub(crate) fn resolve_mut(&mut self, path: &TreePath) -> Option<&mut Node<P, A>> {
        let mut node = self;
        for &segment in path.segments() {
            match node {
                Node::Element { children, .. } => {
                    node = children.get_mut(segment as usize)?;
                }
                _ => return None,
            }
        }
        Some(node)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn props(&self) -> Option<&Props<A>> {
        match self {
            Node::Element { props, .. } => Some(props),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node<P, A>] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }
}

/// Summarize a retained target with the same mirror type used for trees.
pub fn summarize_node<P, A>(node: &Node<P, A>) -> TreeSummary {
    match node {
        Node::Text(text) => TreeSummary::Text(text.to_string()),
        Node::Placeholder(_) => TreeSummary::Placeholder,
        Node::Widget(widget) => TreeSummary::Widget {
            name: widget.identity().name.to_string(),
            id: widget.identity().id.to_string(),
        },
        Node::Element {
            tag,
            props,
            children,
        } => TreeSummary::Element {
            tag: tag.to_string(),
            props: props
                .iter()
                .map(|(key, prop)| {
                    let rendered = match prop {
                        Prop::Value(value) => value.to_display_string(),
                        Prop::Hook(_) => "#hook".to_string(),
                    };
                    (key.to_string(), rendered)
                })
                .collect(),
            children: children.iter().map(summarize_node).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_walks_children() {
        let node: Node<(), ()> = Node::Element {
            tag: "div".into(),
            props: Props::new(),
            children: vec![
                Node::Text("a".into()),
                Node::Element {
                    tag: "span".into(),
                    props: Props::new(),
                    children: vec![Node::Text("b".into())],
                },
            ],
        };

        let path = TreePath::from(&[1_u32, 0][..]);
        assert_eq!(node.resolve(&path).and_then(Node::text), Some("b"));
        assert!(node.resolve(&TreePath::from(&[0_u32, 0][..])).is_none());
    }
}
