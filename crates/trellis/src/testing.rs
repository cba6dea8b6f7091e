//! Reference driver for exercising components without a platform backend.
//!
//! The harness does exactly what a production driver contract demands:
//! mount renders the component's current view with `create_element`, each
//! fed request is run to completion (diff, patch, then drain and route
//! actions until quiescent), private messages loop back into the component
//! that produced them, and public responses are collected for assertions.

use either::Either;
use trellis_render::{fire, summarize_node, Node, Renderer, WidgetRegistry};
use trellis_tree::{diff, EventPayload, Html, TreePath, TreeSummary};

use crate::component::{run_component, Component, ComponentSf, PrivateMsg};
use crate::context::{Context, RunContext};

type Action<M, Res> = <M as Context>::Of<Either<PrivateMsg, Res>>;

/// A mounted component under test.
pub struct Harness<P, M, Req, Res>
where
    P: Clone + PartialEq + 'static,
    M: RunContext,
    Req: 'static,
    Res: Clone + 'static,
{
    sf: ComponentSf<P, M, Req, Res>,
    renderer: Renderer<P, Action<M, Res>>,
    tree: Html<P, Action<M, Res>>,
    root: Option<Node<P, Action<M, Res>>>,
    responses: Vec<Res>,
}

impl<P, M, Req, Res> Harness<P, M, Req, Res>
where
    P: Clone + PartialEq + 'static,
    M: RunContext,
    Req: 'static,
    Res: Clone + 'static,
{
    /// Unwrap the component and materialize its initial view.
    pub fn mount(component: Component<P, M, Req, Res>) -> Self {
        run_component(component, |sf| {
            let tree = sf.current().clone();
            let mut renderer = Renderer::new();
            let root = renderer.create_element(&tree);
            let mut harness = Self {
                sf,
                renderer,
                tree,
                root: Some(root),
                responses: Vec::new(),
            };
            harness.settle();
            harness
        })
    }

    /// Feed a public request and run to quiescence.
    pub fn send(&mut self, request: Req) {
        self.step(Either::Right(request));
        self.settle();
    }

    /// Fire an event hook on the rendered target and route its action.
    ///
    /// Returns false when no hook lives under `key` at `path`.
    pub fn fire(&mut self, path: &TreePath, key: &str, payload: EventPayload) -> bool {
        let action = {
            let root = self.root.as_ref().expect("render target present");
            fire(root, path, key, payload)
        };
        match action {
            Some(action) => {
                let output = M::run::<Either<PrivateMsg, Res>>(action);
                self.route(output);
                self.settle();
                true
            }
            None => false,
        }
    }

    /// Drain actions delivered outside a feed (asynchronous widget
    /// responses) and run to quiescence.
    pub fn pump(&mut self) {
        self.settle();
    }

    /// The view emitted by the most recent render.
    pub fn tree(&self) -> &Html<P, Action<M, Res>> {
        &self.tree
    }

    /// The live render target.
    pub fn root(&self) -> &Node<P, Action<M, Res>> {
        self.root.as_ref().expect("render target present")
    }

    /// Structure summary of the live render target.
    pub fn summary(&self) -> TreeSummary {
        summarize_node(self.root())
    }

    pub fn registry(&self) -> &WidgetRegistry {
        self.renderer.registry()
    }

    /// Responses surfaced since the last take.
    pub fn take_responses(&mut self) -> Vec<Res> {
        std::mem::take(&mut self.responses)
    }

    pub fn responses(&self) -> &[Res] {
        &self.responses
    }

    /// Tear down the target, destroying every live widget.
    pub fn unmount(mut self) {
        let root = self.root.take().expect("render target present");
        self.renderer
            .unmount(root)
            .expect("unmount destroys cleanly");
    }

    fn step(&mut self, input: Either<PrivateMsg, Req>) {
        let next = self.sf.feed(input);
        let patch = diff(&self.tree, &next);
        let root = self.root.take().expect("render target present");
        let root = self
            .renderer
            .apply(patch, root)
            .expect("patch applies cleanly");
        self.root = Some(root);
        self.tree = next;
    }

    /// Drain and route queued actions until no more arrive (the driver
    /// loop's run-until-quiescent step).
    fn settle(&mut self) {
        loop {
            let actions = self.renderer.drain_actions();
            if actions.is_empty() {
                break;
            }
            for action in actions {
                let output = M::run::<Either<PrivateMsg, Res>>(action);
                self.route(output);
            }
        }
    }

    fn route(&mut self, output: Either<PrivateMsg, Res>) {
        match output {
            Either::Left(private) => self.step(Either::Left(private)),
            Either::Right(response) => self.responses.push(response),
        }
    }
}
