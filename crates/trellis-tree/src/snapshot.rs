//! Serializable structure summaries.
//!
//! A summary captures the shape of a frame (tags, text, plain prop values,
//! widget identities) without the closures a live tree carries, so it can
//! be serialized for diagnostics or compared in tests.

use serde::{Deserialize, Serialize};

use crate::html::Html;
use crate::props::Prop;

/// A serializable mirror of a view tree's structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TreeSummary {
    Text(String),
    Element {
        tag: String,
        /// Key/value pairs; event hooks render as `"#hook"`.
        props: Vec<(String, String)>,
        children: Vec<TreeSummary>,
    },
    Placeholder,
    Widget {
        name: String,
        id: String,
    },
}

/// Summarize one frame.
pub fn summarize<P, A>(tree: &Html<P, A>) -> TreeSummary {
    match tree {
        Html::Text(text) => TreeSummary::Text(text.to_string()),
        Html::Placeholder(_) => TreeSummary::Placeholder,
        Html::Widget(widget) => TreeSummary::Widget {
            name: widget.identity().name.to_string(),
            id: widget.identity().id.to_string(),
        },
        Html::Element(element) => TreeSummary::Element {
            tag: element.tag.to_string(),
            props: element
                .props
                .iter()
                .map(|(key, prop)| {
                    let rendered = match prop {
                        Prop::Value(value) => value.to_display_string(),
                        Prop::Hook(_) => "#hook".to_string(),
                    };
                    (key.to_string(), rendered)
                })
                .collect(),
            children: element.children.iter().map(summarize).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::WidgetIdentity;
    use crate::props::{EventHook, Props};
    use crate::widget::{LifecycleFns, Responder, Widget};
    use std::rc::Rc;

    #[test]
    fn summary_captures_structure_without_closures() {
        let widget: Widget<u32> = Widget::new(
            WidgetIdentity::new("clock", "c1"),
            Rc::new(LifecycleFns {
                init: Rc::new(|_: Responder<u32>| ((), ())),
                update: Rc::new(|_: &mut (), _: &mut ()| None),
                destroy: Rc::new(|_: (), _: ()| {}),
            }),
        );
        let tree: Html<(), u32> = Html::element(
            "div",
            Props::new()
                .with_value("class", "row")
                .with_hook("press", EventHook::new(|_| 1)),
            vec![Html::text("hi"), Html::widget(widget)],
        );

        let summary = summarize(&tree);
        assert_eq!(
            summary,
            TreeSummary::Element {
                tag: "div".into(),
                props: vec![
                    ("class".into(), "row".into()),
                    ("press".into(), "#hook".into()),
                ],
                children: vec![
                    TreeSummary::Text("hi".into()),
                    TreeSummary::Widget {
                        name: "clock".into(),
                        id: "c1".into()
                    },
                ],
            }
        );
    }

    #[test]
    fn summary_round_trips_through_json() {
        let tree: Html<(), ()> =
            Html::element("div", Props::new(), vec![Html::text("x"), Html::Placeholder(())]);
        let summary = summarize(&tree);
        let json = serde_json::to_string(&summary).unwrap();
        let back: TreeSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
