//! Routing through a parallel combination of two components.

use either::Either;
use trellis::testing::Harness;
use trellis::{combine, Component, NestUnder, Pure, Sf1};
use trellis_tree::{EventHook, EventPayload, Html, Props, TreePath, TreeSummary};

#[derive(Clone, Debug)]
struct Bump;

/// A counter with a private bump loop, a public "shift" request and a
/// public "report" response, labelled so the two instances differ.
fn labelled_counter(label: &'static str) -> Component<(), Pure, i64, String> {
    let view = move |count: &i64| -> Html<(), Either<Bump, String>> {
        let report = format!("{label}={count}");
        Html::element(
            "section",
            Props::new().with_value("label", label),
            vec![
                Html::element(
                    "button",
                    Props::new().with_hook("press", EventHook::new(|_| Either::Left(Bump))),
                    vec![Html::text("bump")],
                ),
                Html::element(
                    "button",
                    Props::new()
                        .with_hook("press", EventHook::new(move |_| Either::Right(report.clone()))),
                    vec![Html::text("report")],
                ),
                Html::text(format!("{label} count {count}")),
            ],
        )
    };
    Component::with_loop::<Bump>(Sf1::fold(
        0_i64,
        view,
        |count, input: Either<Bump, i64>| match input {
            Either::Left(Bump) => *count += 1,
            Either::Right(shift) => *count += shift,
        },
    ))
}

type Combined = Harness<(), Pure, Either<i64, i64>, Either<String, String>>;

fn mount_combined() -> Combined {
    Harness::mount(combine(
        NestUnder::new("main"),
        labelled_counter("left"),
        labelled_counter("right"),
    ))
}

fn side_text(harness: &Combined, side: u32) -> String {
    harness.root().children()[side as usize].children()[2]
        .text()
        .expect("count text present")
        .to_string()
}

#[test]
fn merged_view_nests_both_sides() {
    let harness = mount_combined();
    let TreeSummary::Element { tag, children, .. } = harness.summary() else {
        panic!("expected element root");
    };
    assert_eq!(tag, "main");
    assert_eq!(children.len(), 2);
    assert_eq!(side_text(&harness, 0), "left count 0");
    assert_eq!(side_text(&harness, 1), "right count 0");
}

#[test]
fn public_left_reaches_only_the_first_component() {
    let mut harness = mount_combined();
    harness.send(Either::Left(5));

    assert_eq!(side_text(&harness, 0), "left count 5");
    assert_eq!(side_text(&harness, 1), "right count 0");
    assert!(harness.responses().is_empty());
}

#[test]
fn private_loops_stay_local_to_their_side() {
    let mut harness = mount_combined();

    // Fire the right side's bump hook: its action re-enters the combined
    // component as a private-right message.
    let right_bump = TreePath::root().child(1).child(0);
    assert!(harness.fire(&right_bump, "press", EventPayload::Unit));

    assert_eq!(side_text(&harness, 0), "left count 0");
    assert_eq!(side_text(&harness, 1), "right count 1");
}

#[test]
fn responses_are_retagged_per_side() {
    let mut harness = mount_combined();
    harness.send(Either::Left(2));

    let left_report = TreePath::root().child(0).child(1);
    let right_report = TreePath::root().child(1).child(1);
    harness.fire(&left_report, "press", EventPayload::Unit);
    harness.fire(&right_report, "press", EventPayload::Unit);

    assert_eq!(
        harness.take_responses(),
        vec![
            Either::Left("left=2".to_string()),
            Either::Right("right=0".to_string()),
        ]
    );
}

#[test]
fn combined_output_matches_the_component_alone() {
    // Feeding a public-left request produces exactly what the first
    // component alone produces for that request, re-tagged.
    let mut alone = Harness::mount(labelled_counter("left"));
    alone.send(7);

    let mut combined = mount_combined();
    combined.send(Either::Left(7));

    let TreeSummary::Element { children, .. } = combined.summary() else {
        panic!("expected element root");
    };
    assert_eq!(children[0], alone.summary());
}
