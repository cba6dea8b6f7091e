//! Observable-equivalence laws: placeholder maps, dimap, private-type
//! renaming.

use either::Either;
use trellis::{run_component, Component, Pure, Sf1};
use trellis_tree::{Html, Props, TreeSummary};

/// A component that renders its fed label as text and a placeholder slot
/// derived from it; the placeholder laws only observe emitted views.
fn slotted(prefix: &'static str) -> Component<String, Pure, String, String> {
    Component::new(Sf1::fold(
        String::from("start"),
        move |label: &String| -> Html<String, String> {
            Html::element(
                "div",
                Props::new(),
                vec![
                    Html::text(format!("{prefix}:{label}")),
                    Html::placeholder(format!("slot-{label}")),
                ],
            )
        },
        |label, request: String| *label = request,
    ))
}

/// Collect placeholder values, the observation `TreeSummary` erases.
fn placeholders<P: Clone, A>(tree: &Html<P, A>) -> Vec<P> {
    match tree {
        Html::Placeholder(value) => vec![value.clone()],
        Html::Element(element) => element
            .children
            .iter()
            .flat_map(placeholders)
            .collect(),
        _ => Vec::new(),
    }
}

/// Drive a component over a script and record each view's placeholders
/// and structure.
fn observe<P: Clone + 'static>(
    component: Component<P, Pure, String, String>,
    script: &[&str],
) -> Vec<(Vec<P>, TreeSummary)> {
    run_component(component, |mut sf| {
        let mut seen = vec![(
            placeholders(sf.current()),
            trellis_tree::summarize(sf.current()),
        )];
        for request in script {
            let view = sf.feed(Either::Right(request.to_string()));
            seen.push((placeholders(&view), trellis_tree::summarize(&view)));
        }
        seen
    })
}

const SCRIPT: &[&str] = &["a", "b", "c"];

#[test]
fn map_placeholder_identity_is_observably_identical() {
    let plain = observe(slotted("x"), SCRIPT);
    let mapped = observe(slotted("x").map_placeholder(|p: String| p), SCRIPT);
    assert_eq!(plain, mapped);
}

#[test]
fn map_placeholder_composes() {
    let f = |p: String| format!("[{p}]");
    let g = |p: String| p.len();

    let stepwise = observe(
        slotted("x").map_placeholder(f).map_placeholder(g),
        SCRIPT,
    );
    let fused = observe(slotted("x").map_placeholder(move |p| g(f(p))), SCRIPT);
    assert_eq!(stepwise, fused);
}

/// Drive a component and record responses for each request via the echo
/// hook pattern: the view carries the response-producing action.
fn echo() -> Component<(), Pure, i64, i64> {
    Component::new(Sf1::fold(
        0_i64,
        |value: &i64| -> Html<(), i64> {
            Html::element("div", Props::new(), vec![Html::text(format!("v {value}"))])
        },
        |value, request: i64| *value = request,
    ))
}

fn observe_views(component: Component<(), Pure, i64, i64>, script: &[i64]) -> Vec<TreeSummary> {
    run_component(component, |mut sf| {
        script
            .iter()
            .map(|&request| trellis_tree::summarize(&sf.feed(Either::Right(request))))
            .collect()
    })
}

#[test]
fn dimap_identity_is_a_no_op() {
    let plain = observe_views(echo(), &[1, 2, 3]);
    let mapped = observe_views(echo().dimap(|req: i64| req, |res| res), &[1, 2, 3]);
    assert_eq!(plain, mapped);
}

#[test]
fn dimap_composes() {
    let stepwise = observe_views(
        echo()
            .dimap(|req: i64| req + 1, |res| res * 2)
            .dimap(|req: i64| req * 10, |res| res - 1),
        &[1, 2, 3],
    );
    let fused = observe_views(
        echo().dimap(|req: i64| (req * 10) + 1, |res: i64| (res * 2) - 1),
        &[1, 2, 3],
    );
    assert_eq!(stepwise, fused);
}

#[test]
fn dimap_rewrites_requests_and_responses_around_the_private_loop() {
    use trellis::testing::Harness;
    use trellis_tree::{EventHook, EventPayload, TreePath};

    let reporting = Component::new(Sf1::fold(
        0_i64,
        |value: &i64| -> Html<(), i64> {
            let seen = *value;
            Html::element(
                "button",
                Props::new().with_hook("press", EventHook::new(move |_| seen)),
                vec![Html::text(format!("v {value}"))],
            )
        },
        |value, request: i64| *value = request,
    ));
    let mapped: Component<(), Pure, String, String> = reporting.dimap(
        |request: String| request.len() as i64,
        |response| format!("seen {response}"),
    );

    let mut harness = Harness::mount(mapped);
    harness.send("four".into());
    harness.fire(&TreePath::root(), "press", EventPayload::Unit);
    assert_eq!(harness.take_responses(), vec!["seen 4".to_string()]);
}

#[test]
fn behavior_is_invariant_under_renaming_the_private_type() {
    use std::rc::Rc;
    use trellis::testing::Harness;
    use trellis_tree::{EventHook, EventPayload, TreePath};

    #[derive(Clone, Debug)]
    struct TickA(u32);
    #[derive(Clone, Debug)]
    struct TickB(u32);

    fn looped_with<I: Clone + 'static>(
        wrap: impl Fn(u32) -> I + 'static,
        unwrap: impl Fn(&I) -> u32 + 'static,
    ) -> Component<(), Pure, String, String> {
        let wrap = Rc::new(wrap);
        Component::with_loop::<I>(Sf1::fold(
            0_u32,
            move |count: &u32| -> Html<(), Either<I, String>> {
                let wrap = wrap.clone();
                Html::element(
                    "div",
                    Props::new(),
                    vec![
                        Html::element(
                            "button",
                            Props::new().with_hook(
                                "press",
                                EventHook::new(move |_| Either::Left(wrap(2))),
                            ),
                            vec![Html::text("tick")],
                        ),
                        Html::text(format!("ticks {count}")),
                    ],
                )
            },
            move |count, input: Either<I, String>| match input {
                Either::Left(tick) => *count += unwrap(&tick),
                Either::Right(_) => *count += 1,
            },
        ))
    }

    let observe = |component: Component<(), Pure, String, String>| {
        let mut harness = Harness::mount(component);
        let tick = TreePath::root().child(0);
        let mut seen = vec![harness.summary()];
        harness.fire(&tick, "press", EventPayload::Unit);
        seen.push(harness.summary());
        harness.send("go".into());
        seen.push(harness.summary());
        harness.fire(&tick, "press", EventPayload::Unit);
        seen.push(harness.summary());
        seen
    };

    let a = observe(looped_with(TickA, |t| t.0));
    let b = observe(looped_with(TickB, |t| t.0));
    assert_eq!(a, b);

    // The private traffic actually moved the counter.
    let TreeSummary::Element { children, .. } = a.last().unwrap().clone() else {
        panic!("expected element root");
    };
    assert_eq!(children[1], TreeSummary::Text("ticks 5".into()));
}
