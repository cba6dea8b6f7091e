//! The component composition algebra.
//!
//! A [`Component`] wraps a signal function together with a private message
//! channel that is never observable from outside this module. The private
//! type is absorbed into the sealed [`PrivateMsg`] envelope at
//! construction: no public signature mentions it, no caller can construct
//! or inspect an envelope, and the only way to unwrap a component,
//! [`run_component`], hands out the signal function with the envelope
//! still sealed. Composition therefore never leaks one component's
//! internal signaling into another's.
//!
//! All operations here are total rewrites of well-typed values; nothing
//! fails at the data level. The one reachable panic is feeding a component
//! a private envelope it did not produce, which violates the driver
//! contract (loop a component's private messages back to that component
//! and no other).

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use either::Either;
use trellis_tree::{Html, Props};

use crate::context::{Context, ContextTransform};
use crate::routing::{self, Routed};
use crate::sf::Sf1;

/// The sealed carrier of a component's private message.
///
/// Clonable and unforgeable: only the algebra wraps values into envelopes,
/// and only the component that produced an envelope can unwrap it.
pub struct PrivateMsg(Rc<dyn Any>);

impl PrivateMsg {
    fn wrap<I: Clone + 'static>(message: I) -> Self {
        Self(Rc::new(message))
    }

    fn unwrap_as<I: Clone + 'static>(self) -> I {
        match self.0.downcast::<I>() {
            Ok(message) => (*message).clone(),
            Err(_) => panic!(
                "a private message was fed to a component that did not produce it"
            ),
        }
    }
}

impl Clone for PrivateMsg {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl fmt::Debug for PrivateMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateMsg")
    }
}

/// The signal function underlying a component, as handed to the driver.
pub type ComponentSf<P, M, Req, Res> =
    Sf1<Either<PrivateMsg, Req>, Html<P, <M as Context>::Of<Either<PrivateMsg, Res>>>>;

/// An opaque, composable UI component.
///
/// `P` is the placeholder type of the views it emits, `M` the effect
/// context of its actions, `Req`/`Res` its public request and response
/// types. Each emitted action yields either a private message (looped back
/// by the driver) or a public response (surfaced to the caller).
pub struct Component<P, M: Context, Req, Res>
where
    Res: Clone + 'static,
{
    sf: ComponentSf<P, M, Req, Res>,
}

impl<P, M, Req, Res> Component<P, M, Req, Res>
where
    P: Clone + 'static,
    M: Context,
    Req: 'static,
    Res: Clone + 'static,
{
    /// Lift a signal function with no private channel.
    ///
    /// The private channel of the result can never be populated, so every
    /// fed value is a public request and every emitted action is a public
    /// response.
    pub fn new(sf: Sf1<Req, Html<P, M::Of<Res>>>) -> Self {
        let mut inner = sf;
        let initial = publicize::<P, M, Res>(inner.current().clone());
        let sf = Sf1::new(initial, move |input: Either<PrivateMsg, Req>| {
            match input {
                Either::Left(_) => unreachable!(
                    "a component without a private channel was fed a private message"
                ),
                Either::Right(request) => publicize::<P, M, Res>(inner.feed(request)),
            }
        });
        Self { sf }
    }

    /// The general constructor: a signal function over a caller-chosen
    /// private type `I`, hidden behind the envelope immediately.
    pub fn with_loop<I: Clone + 'static>(
        sf: Sf1<Either<I, Req>, Html<P, M::Of<Either<I, Res>>>>,
    ) -> Self {
        let mut inner = sf;
        let initial = seal::<P, M, I, Res>(inner.current().clone());
        let sf = Sf1::new(initial, move |input: Either<PrivateMsg, Req>| {
            let routed = match input {
                Either::Left(envelope) => Either::Left(envelope.unwrap_as::<I>()),
                Either::Right(request) => Either::Right(request),
            };
            seal::<P, M, I, Res>(inner.feed(routed))
        });
        Self { sf }
    }

    /// Rewrite the placeholder type throughout every emitted view.
    pub fn map_placeholder<Q: Clone + 'static>(
        self,
        f: impl Fn(P) -> Q + 'static,
    ) -> Component<Q, M, Req, Res> {
        let f: Rc<dyn Fn(P) -> Q> = Rc::new(f);
        let mut inner = self.sf;
        let initial = {
            let f = f.clone();
            inner.current().clone().map_placeholder(move |p| f(p))
        };
        let sf = Sf1::new(initial, move |input| {
            let f = f.clone();
            inner.feed(input).map_placeholder(move |p| f(p))
        });
        Component { sf }
    }

    /// Replace the effect context `M` by `N`.
    ///
    /// The transform's method is generic over the wrapped message type, so
    /// it cannot case-analyse particular messages: it is a
    /// structure-preserving swap, safe for substituting a mock context.
    pub fn hoist<N: Context>(
        self,
        transform: impl ContextTransform<M, N> + 'static,
    ) -> Component<P, N, Req, Res> {
        let transform = Rc::new(transform);
        let mut inner = self.sf;
        let initial = hoist_view::<P, M, N, Res, _>(inner.current().clone(), transform.clone());
        let sf = Sf1::new(initial, move |input| {
            hoist_view::<P, M, N, Res, _>(inner.feed(input), transform.clone())
        });
        Component { sf }
    }

    /// Contravariantly rewrite requests and covariantly rewrite responses.
    ///
    /// Private messages flow through unchanged.
    pub fn dimap<Req2: 'static, Res2: Clone + 'static>(
        self,
        before: impl Fn(Req2) -> Req + 'static,
        after: impl Fn(Res) -> Res2 + 'static,
    ) -> Component<P, M, Req2, Res2> {
        let after: Rc<dyn Fn(Res) -> Res2> = Rc::new(after);
        let mut inner = self.sf;
        let initial = retag_response::<P, M, Res, Res2>(inner.current().clone(), after.clone());
        let sf = Sf1::new(initial, move |input: Either<PrivateMsg, Req2>| {
            let routed = input.map_right(&before);
            retag_response::<P, M, Res, Res2>(inner.feed(routed), after.clone())
        });
        Component { sf }
    }
}

/// Unwrap a component for driving.
///
/// The only sanctioned way to reach the underlying signal function. The
/// envelope stays sealed, so the transform must treat private messages
/// generically: feed them back unchanged, to this component only.
pub fn run_component<P, M, Req, Res, R>(
    component: Component<P, M, Req, Res>,
    transform: impl FnOnce(ComponentSf<P, M, Req, Res>) -> R,
) -> R
where
    P: Clone + 'static,
    M: Context,
    Req: 'static,
    Res: Clone + 'static,
{
    transform(component.sf)
}

/// A view merger for [`combine`].
///
/// `merge` is universally quantified over the action type, so an
/// implementation cannot depend on particular actions: it must commute
/// with any action-preserving transform of either view, which is what lets
/// `combine` re-tag actions before merging without changing the observed
/// structure.
pub trait ViewMerge<P> {
    fn merge<A: Clone + 'static>(&self, first: Html<P, A>, second: Html<P, A>) -> Html<P, A>;
}

/// Merge two views by nesting them under a fresh element.
pub struct NestUnder {
    pub tag: Arc<str>,
}

impl NestUnder {
    pub fn new(tag: impl Into<Arc<str>>) -> Self {
        Self { tag: tag.into() }
    }
}

impl<P: Clone + 'static> ViewMerge<P> for NestUnder {
    fn merge<A: Clone + 'static>(&self, first: Html<P, A>, second: Html<P, A>) -> Html<P, A> {
        Html::element(self.tag.clone(), Props::new(), vec![first, second])
    }
}

/// Parallel combination of two components.
///
/// Requests and responses become disjoint sums; each side's private
/// channel stays local. A fed value routes to exactly one constituent
/// (see [`routing`]), and each side's emitted actions are re-tagged into
/// the combined surface: private messages into the fresh combined
/// envelope, responses into `Either<Res1, Res2>`.
pub fn combine<P, M, Req1, Res1, Req2, Res2>(
    merge: impl ViewMerge<P> + 'static,
    first: Component<P, M, Req1, Res1>,
    second: Component<P, M, Req2, Res2>,
) -> Component<P, M, Either<Req1, Req2>, Either<Res1, Res2>>
where
    P: Clone + 'static,
    M: Context,
    Req1: 'static,
    Res1: Clone + 'static,
    Req2: 'static,
    Res2: Clone + 'static,
{
    let mut first_sf = first.sf;
    let mut second_sf = second.sf;
    let initial = merge.merge(
        retag_first::<P, M, Res1, Res2>(first_sf.current().clone()),
        retag_second::<P, M, Res1, Res2>(second_sf.current().clone()),
    );
    let sf = Sf1::new(
        initial,
        move |input: Either<PrivateMsg, Either<Req1, Req2>>| {
            let unsealed = match input {
                Either::Left(envelope) => {
                    Either::Left(envelope.unwrap_as::<Either<PrivateMsg, PrivateMsg>>())
                }
                Either::Right(request) => Either::Right(request),
            };
            match routing::split(unsealed) {
                Routed::PrivateFirst(private) => {
                    first_sf.feed(Either::Left(private));
                }
                Routed::PublicFirst(request) => {
                    first_sf.feed(Either::Right(request));
                }
                Routed::PrivateSecond(private) => {
                    second_sf.feed(Either::Left(private));
                }
                Routed::PublicSecond(request) => {
                    second_sf.feed(Either::Right(request));
                }
            }
            merge.merge(
                retag_first::<P, M, Res1, Res2>(first_sf.current().clone()),
                retag_second::<P, M, Res1, Res2>(second_sf.current().clone()),
            )
        },
    );
    Component { sf }
}

fn publicize<P, M, Res>(view: Html<P, M::Of<Res>>) -> Html<P, M::Of<Either<PrivateMsg, Res>>>
where
    P: Clone + 'static,
    M: Context,
    Res: Clone + 'static,
{
    view.map_action(|action| {
        M::map::<Res, Either<PrivateMsg, Res>>(action, |response| Either::Right(response))
    })
}

fn seal<P, M, I, Res>(
    view: Html<P, M::Of<Either<I, Res>>>,
) -> Html<P, M::Of<Either<PrivateMsg, Res>>>
where
    P: Clone + 'static,
    M: Context,
    I: Clone + 'static,
    Res: Clone + 'static,
{
    view.map_action(|action| {
        M::map::<Either<I, Res>, Either<PrivateMsg, Res>>(action, |output| match output {
            Either::Left(private) => Either::Left(PrivateMsg::wrap(private)),
            Either::Right(response) => Either::Right(response),
        })
    })
}

fn retag_response<P, M, Res, Res2>(
    view: Html<P, M::Of<Either<PrivateMsg, Res>>>,
    after: Rc<dyn Fn(Res) -> Res2>,
) -> Html<P, M::Of<Either<PrivateMsg, Res2>>>
where
    P: Clone + 'static,
    M: Context,
    Res: Clone + 'static,
    Res2: Clone + 'static,
{
    view.map_action(move |action| {
        let after = after.clone();
        M::map::<Either<PrivateMsg, Res>, Either<PrivateMsg, Res2>>(action, move |output| {
            output.map_right(|response| after(response))
        })
    })
}

fn hoist_view<P, M, N, Res, F>(
    view: Html<P, M::Of<Either<PrivateMsg, Res>>>,
    transform: Rc<F>,
) -> Html<P, N::Of<Either<PrivateMsg, Res>>>
where
    P: Clone + 'static,
    M: Context,
    N: Context,
    Res: Clone + 'static,
    F: ContextTransform<M, N> + 'static,
{
    view.map_action(move |action| transform.transform::<Either<PrivateMsg, Res>>(action))
}

fn retag_first<P, M, Res1, Res2>(
    view: Html<P, M::Of<Either<PrivateMsg, Res1>>>,
) -> Html<P, M::Of<Either<PrivateMsg, Either<Res1, Res2>>>>
where
    P: Clone + 'static,
    M: Context,
    Res1: Clone + 'static,
    Res2: Clone + 'static,
{
    view.map_action(|action| {
        M::map::<Either<PrivateMsg, Res1>, Either<PrivateMsg, Either<Res1, Res2>>>(
            action,
            |output| {
                routing::merge_first::<PrivateMsg, PrivateMsg, Res1, Res2>(output)
                    .map_left(PrivateMsg::wrap)
            },
        )
    })
}

fn retag_second<P, M, Res1, Res2>(
    view: Html<P, M::Of<Either<PrivateMsg, Res2>>>,
) -> Html<P, M::Of<Either<PrivateMsg, Either<Res1, Res2>>>>
where
    P: Clone + 'static,
    M: Context,
    Res1: Clone + 'static,
    Res2: Clone + 'static,
{
    view.map_action(|action| {
        M::map::<Either<PrivateMsg, Res2>, Either<PrivateMsg, Either<Res1, Res2>>>(
            action,
            |output| {
                routing::merge_second::<PrivateMsg, PrivateMsg, Res1, Res2>(output)
                    .map_left(PrivateMsg::wrap)
            },
        )
    })
}
