//! Building a [`Component`] from an imperative widget spec.
//!
//! The resulting component's view is a single widget leaf with a stable
//! identity, so reconciliation runs `init` once, `update` on every
//! subsequent render and `destroy` when a render omits the widget. The
//! widget's self-update signal is looped through the component's private
//! channel: the public request type stays exactly `Req`.

use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use either::Either;
use trellis_tree::{
    Html, Lifecycle, Responder, Widget, WidgetIdentity, WidgetState, WidgetTarget,
};

use crate::component::Component;
use crate::context::Context;
use crate::sf::Sf1;

/// The private self-update message of a widget component.
#[derive(Clone, Debug)]
struct Refresh;

/// Handle given to a widget's `init`.
///
/// `respond` surfaces a public response to the component's caller;
/// `refresh` asks the component to re-render itself (running the widget's
/// `update`) without any external request. Both may be invoked
/// asynchronously, but never after `destroy`.
pub struct WidgetResponder<Res> {
    respond: Rc<dyn Fn(Res)>,
    refresh: Rc<dyn Fn()>,
}

impl<Res> WidgetResponder<Res> {
    pub fn respond(&self, response: Res) {
        (self.respond)(response)
    }

    pub fn refresh(&self) {
        (self.refresh)()
    }
}

impl<Res> Clone for WidgetResponder<Res> {
    fn clone(&self) -> Self {
        Self {
            respond: self.respond.clone(),
            refresh: self.refresh.clone(),
        }
    }
}

/// An imperative widget spec: identity plus typed lifecycle closures.
///
/// `update` receives the request that caused the render, or `None` when
/// the render was triggered by the widget's own `refresh`.
pub struct WidgetSpec<Req, Res, S, T> {
    pub name: Arc<str>,
    pub id: Arc<str>,
    pub init: Rc<dyn Fn(WidgetResponder<Res>) -> (S, T)>,
    pub update: Rc<dyn Fn(&mut S, &mut T, Option<&Req>) -> Option<T>>,
    pub destroy: Rc<dyn Fn(S, T)>,
}

impl<Req, Res, S, T> WidgetSpec<Req, Res, S, T> {
    pub fn new(
        name: impl Into<Arc<str>>,
        id: impl Into<Arc<str>>,
        init: impl Fn(WidgetResponder<Res>) -> (S, T) + 'static,
        update: impl Fn(&mut S, &mut T, Option<&Req>) -> Option<T> + 'static,
        destroy: impl Fn(S, T) + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            init: Rc::new(init),
            update: Rc::new(update),
            destroy: Rc::new(destroy),
        }
    }
}

impl<Req, Res, S, T> Clone for WidgetSpec<Req, Res, S, T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            id: self.id.clone(),
            init: self.init.clone(),
            update: self.update.clone(),
            destroy: self.destroy.clone(),
        }
    }
}

struct SpecLifecycle<Req, Res, S, T, M> {
    spec: WidgetSpec<Req, Res, S, T>,
    request: Option<Req>,
    _context: PhantomData<M>,
}

impl<Req, Res, S, T, M> Lifecycle<M::Of<Either<Refresh, Res>>> for SpecLifecycle<Req, Res, S, T, M>
where
    Req: 'static,
    Res: Clone + 'static,
    S: 'static,
    T: 'static,
    M: Context,
{
    fn init(&self, responder: Responder<M::Of<Either<Refresh, Res>>>) -> (WidgetState, WidgetTarget) {
        let respond: Rc<dyn Fn(Res)> = {
            let responder = responder.clone();
            Rc::new(move |response: Res| {
                responder.send(M::pure::<Either<Refresh, Res>>(Either::Right(response)));
            })
        };
        let refresh: Rc<dyn Fn()> = Rc::new(move || {
            responder.send(M::pure::<Either<Refresh, Res>>(Either::Left(Refresh)));
        });
        let (state, target) = (self.spec.init)(WidgetResponder { respond, refresh });
        (WidgetState::new(state), WidgetTarget::new(target))
    }

    fn update(&self, state: &mut WidgetState, target: &mut WidgetTarget) -> Option<WidgetTarget> {
        let state = state
            .downcast_mut::<S>()
            .expect("widget state type does not match its spec");
        let target = target
            .downcast_mut::<T>()
            .expect("widget target type does not match its spec");
        (self.spec.update)(state, target, self.request.as_ref()).map(WidgetTarget::new)
    }

    fn destroy(&self, state: WidgetState, target: WidgetTarget) {
        let state = state
            .into_inner::<S>()
            .expect("widget state type does not match its spec");
        let target = target
            .into_inner::<T>()
            .expect("widget target type does not match its spec");
        (self.spec.destroy)(state, target)
    }
}

/// Build a component from an imperative widget spec.
pub fn widget<P, M, Req, Res, S, T>(spec: WidgetSpec<Req, Res, S, T>) -> Component<P, M, Req, Res>
where
    P: Clone + 'static,
    M: Context,
    Req: Clone + 'static,
    Res: Clone + 'static,
    S: 'static,
    T: 'static,
{
    let identity = WidgetIdentity::new(spec.name.clone(), spec.id.clone());
    let leaf = move |request: Option<Req>| -> Html<P, M::Of<Either<Refresh, Res>>> {
        Html::widget(Widget::new(
            identity.clone(),
            Rc::new(SpecLifecycle::<Req, Res, S, T, M> {
                spec: spec.clone(),
                request,
                _context: PhantomData,
            }),
        ))
    };
    let initial = leaf(None);
    let sf = Sf1::new(initial, move |input: Either<Refresh, Req>| match input {
        Either::Left(Refresh) => leaf(None),
        Either::Right(request) => leaf(Some(request)),
    });
    Component::with_loop::<Refresh>(sf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Pure;
    use std::cell::RefCell;

    #[test]
    fn responder_routes_refresh_privately_and_respond_publicly() {
        let spec: WidgetSpec<(), &'static str, (), ()> = WidgetSpec::new(
            "echo",
            "e1",
            |responder: WidgetResponder<&'static str>| {
                responder.refresh();
                responder.respond("hello");
                ((), ())
            },
            |_, _, _| None,
            |_, _| {},
        );
        let lifecycle = SpecLifecycle::<(), &'static str, (), (), Pure> {
            spec,
            request: None,
            _context: PhantomData,
        };

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let responder = Responder::new(move |action: Either<Refresh, &'static str>| {
            sink.borrow_mut().push(match action {
                Either::Left(Refresh) => "private refresh",
                Either::Right(response) => response,
            });
        });

        let (state, target) = lifecycle.init(responder);
        lifecycle.destroy(state, target);
        assert_eq!(*seen.borrow(), vec!["private refresh", "hello"]);
    }
}
