use std::rc::Rc;
use std::sync::Arc;

use crate::props::Props;
use crate::widget::Widget;

/// An immutable description of one rendering frame.
///
/// `P` is the placeholder type, `A` the action type carried by event hooks
/// and widget leaves. The tree is mappable over each independently:
/// [`Html::map_action`] never touches placeholders and
/// [`Html::map_placeholder`] never touches actions.
#[derive(Clone, Debug)]
pub enum Html<P, A> {
    Text(Arc<str>),
    Element(Element<P, A>),
    Placeholder(P),
    Widget(Widget<A>),
}

/// An element node: tag name, attribute set, ordered children.
#[derive(Clone, Debug)]
pub struct Element<P, A> {
    pub tag: Arc<str>,
    pub props: Props<A>,
    pub children: Vec<Html<P, A>>,
}

impl<P, A> Html<P, A> {
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Html::Text(text.into())
    }

    pub fn element(
        tag: impl Into<Arc<str>>,
        props: Props<A>,
        children: Vec<Html<P, A>>,
    ) -> Self {
        Html::Element(Element {
            tag: tag.into(),
            props,
            children,
        })
    }

    pub fn placeholder(value: P) -> Self {
        Html::Placeholder(value)
    }

    pub fn widget(widget: Widget<A>) -> Self {
        Html::Widget(widget)
    }
}

impl<P: Clone + 'static, A: Clone + 'static> Html<P, A> {
    /// Map every action in the tree: hook callbacks, hook attach/detach
    /// actions and widget responses.
    pub fn map_action<B: Clone + 'static>(self, f: impl Fn(A) -> B + 'static) -> Html<P, B> {
        let f: Rc<dyn Fn(A) -> B> = Rc::new(f);
        self.map_action_with(&f)
    }

    fn map_action_with<B: Clone + 'static>(self, f: &Rc<dyn Fn(A) -> B>) -> Html<P, B> {
        match self {
            Html::Text(text) => Html::Text(text),
            Html::Placeholder(value) => Html::Placeholder(value),
            Html::Widget(widget) => Html::Widget(widget.map_response_with(f)),
            Html::Element(element) => Html::Element(Element {
                tag: element.tag,
                props: element.props.map_action_with(f),
                children: element
                    .children
                    .into_iter()
                    .map(|child| child.map_action_with(f))
                    .collect(),
            }),
        }
    }

    /// Map every placeholder leaf, leaving actions untouched.
    pub fn map_placeholder<Q: Clone + 'static>(
        self,
        f: impl Fn(P) -> Q + 'static,
    ) -> Html<Q, A> {
        let f: Rc<dyn Fn(P) -> Q> = Rc::new(f);
        self.map_placeholder_with(&f)
    }

    fn map_placeholder_with<Q: Clone + 'static>(self, f: &Rc<dyn Fn(P) -> Q>) -> Html<Q, A> {
        match self {
            Html::Text(text) => Html::Text(text),
            Html::Placeholder(value) => Html::Placeholder(f(value)),
            Html::Widget(widget) => Html::Widget(widget),
            Html::Element(element) => Html::Element(Element {
                tag: element.tag,
                props: element.props,
                children: element
                    .children
                    .into_iter()
                    .map(|child| child.map_placeholder_with(f))
                    .collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::{EventHook, EventPayload};

    fn sample() -> Html<&'static str, u32> {
        Html::element(
            "div",
            Props::new().with_hook("press", EventHook::new(|_| 1_u32)),
            vec![
                Html::text("hello"),
                Html::placeholder("slot"),
                Html::element("span", Props::new(), vec![Html::text("world")]),
            ],
        )
    }

    fn press<P>(tree: &Html<P, u32>) -> u32 {
        let Html::Element(element) = tree else {
            panic!("expected element root");
        };
        match element.props.get("press") {
            Some(crate::props::Prop::Hook(hook)) => hook.run(EventPayload::Unit),
            other => panic!("expected hook, got {other:?}"),
        }
    }

    #[test]
    fn map_action_rewrites_hooks_only() {
        let mapped = sample().map_action(|n| n * 10);
        assert_eq!(press(&mapped), 10);

        let Html::Element(element) = &mapped else {
            unreachable!()
        };
        assert!(matches!(element.children[1], Html::Placeholder("slot")));
    }

    #[test]
    fn map_placeholder_rewrites_placeholders_only() {
        let mapped = sample().map_placeholder(|p| p.len());
        let Html::Element(element) = &mapped else {
            unreachable!()
        };
        assert!(matches!(element.children[1], Html::Placeholder(4)));
        assert_eq!(press(&mapped), 1);
    }
}
