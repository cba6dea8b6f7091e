//! The widget leaf: an imperative, externally-managed object living inside
//! the render tree.
//!
//! The diff engine never looks inside a widget. It only compares identities:
//! a persisting `(name, id)` pair dispatches `update`, a vanished pair
//! dispatches `destroy`, a fresh pair dispatches `init`. State and target
//! are threaded opaquely between lifecycle calls by the patch layer's
//! registry and never appear in public types.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::identity::WidgetIdentity;

/// Opaque state threaded between a widget's lifecycle calls.
pub struct WidgetState(Box<dyn Any>);

impl WidgetState {
    pub fn new<S: 'static>(state: S) -> Self {
        Self(Box::new(state))
    }

    pub fn downcast_mut<S: 'static>(&mut self) -> Option<&mut S> {
        self.0.downcast_mut()
    }

    pub fn into_inner<S: 'static>(self) -> Option<S> {
        self.0.downcast().ok().map(|boxed| *boxed)
    }
}

impl fmt::Debug for WidgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WidgetState")
    }
}

/// Opaque render target owned by a widget instance.
pub struct WidgetTarget(Box<dyn Any>);

impl WidgetTarget {
    pub fn new<T: 'static>(target: T) -> Self {
        Self(Box::new(target))
    }

    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.0.downcast_mut()
    }

    pub fn into_inner<T: 'static>(self) -> Option<T> {
        self.0.downcast().ok().map(|boxed| *boxed)
    }
}

impl fmt::Debug for WidgetTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WidgetTarget")
    }
}

/// Callback handle a widget uses to emit actions asynchronously.
///
/// A destroyed widget must stop sending; responses delivered after destroy
/// are undefined behavior and must be prevented by the widget
/// implementation itself, not by the bridge.
pub struct Responder<A>(Rc<dyn Fn(A)>);

impl<A> Responder<A> {
    pub fn new(send: impl Fn(A) + 'static) -> Self {
        Self(Rc::new(send))
    }

    pub fn send(&self, action: A) {
        (self.0)(action)
    }
}

impl<A> Clone for Responder<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Erased lifecycle protocol of a widget instance.
///
/// `init` runs exactly once at creation, `update` on every render where the
/// identity persists, `destroy` exactly once on removal. `update` may
/// return a replacement target; otherwise the existing target is kept and
/// mutated in place.
pub trait Lifecycle<A> {
    fn init(&self, responder: Responder<A>) -> (WidgetState, WidgetTarget);

    fn update(&self, state: &mut WidgetState, target: &mut WidgetTarget) -> Option<WidgetTarget>;

    fn destroy(&self, state: WidgetState, target: WidgetTarget);
}

/// Typed lifecycle closures, erased behind [`Lifecycle`].
///
/// State and target downcasts cannot fail when the registry threads them:
/// the values put in by `init` are the values handed back later.
pub struct LifecycleFns<S, T, A> {
    pub init: Rc<dyn Fn(Responder<A>) -> (S, T)>,
    pub update: Rc<dyn Fn(&mut S, &mut T) -> Option<T>>,
    pub destroy: Rc<dyn Fn(S, T)>,
}

impl<S, T, A> Clone for LifecycleFns<S, T, A> {
    fn clone(&self) -> Self {
        Self {
            init: self.init.clone(),
            update: self.update.clone(),
            destroy: self.destroy.clone(),
        }
    }
}

impl<S: 'static, T: 'static, A> Lifecycle<A> for LifecycleFns<S, T, A> {
    fn init(&self, responder: Responder<A>) -> (WidgetState, WidgetTarget) {
        let (state, target) = (self.init)(responder);
        (WidgetState::new(state), WidgetTarget::new(target))
    }

    fn update(&self, state: &mut WidgetState, target: &mut WidgetTarget) -> Option<WidgetTarget> {
        let state = state
            .downcast_mut::<S>()
            .expect("widget state type does not match its lifecycle");
        let target = target
            .downcast_mut::<T>()
            .expect("widget target type does not match its lifecycle");
        (self.update)(state, target).map(WidgetTarget::new)
    }

    fn destroy(&self, state: WidgetState, target: WidgetTarget) {
        let state = state
            .into_inner::<S>()
            .expect("widget state type does not match its lifecycle");
        let target = target
            .into_inner::<T>()
            .expect("widget target type does not match its lifecycle");
        (self.destroy)(state, target)
    }
}

/// An opaque handle to an externally-managed object inside the view tree.
pub struct Widget<A> {
    identity: WidgetIdentity,
    lifecycle: Rc<dyn Lifecycle<A>>,
}

impl<A> Widget<A> {
    pub fn new(identity: WidgetIdentity, lifecycle: Rc<dyn Lifecycle<A>>) -> Self {
        Self {
            identity,
            lifecycle,
        }
    }

    pub fn identity(&self) -> &WidgetIdentity {
        &self.identity
    }

    pub fn lifecycle(&self) -> &Rc<dyn Lifecycle<A>> {
        &self.lifecycle
    }

    /// Whether both handles denote the same live instance.
    pub fn same_instance(&self, other: &Widget<A>) -> bool {
        self.identity == other.identity
    }
}

impl<A: Clone + 'static> Widget<A> {
    /// Covariant map over the response type.
    ///
    /// Wraps the responder with a pure function; no lifecycle call is
    /// re-run and the identity pair is preserved unchanged.
    pub fn map_response<B: Clone + 'static>(self, f: impl Fn(A) -> B + 'static) -> Widget<B> {
        let f: Rc<dyn Fn(A) -> B> = Rc::new(f);
        self.map_response_with(&f)
    }

    pub(crate) fn map_response_with<B: Clone + 'static>(
        &self,
        f: &Rc<dyn Fn(A) -> B>,
    ) -> Widget<B> {
        Widget {
            identity: self.identity.clone(),
            lifecycle: Rc::new(MappedLifecycle {
                inner: self.lifecycle.clone(),
                f: f.clone(),
            }),
        }
    }
}

impl<A> Clone for Widget<A> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<A> fmt::Debug for Widget<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Widget({})", self.identity)
    }
}

struct MappedLifecycle<A, B> {
    inner: Rc<dyn Lifecycle<A>>,
    f: Rc<dyn Fn(A) -> B>,
}

impl<A: 'static, B: 'static> Lifecycle<B> for MappedLifecycle<A, B> {
    fn init(&self, responder: Responder<B>) -> (WidgetState, WidgetTarget) {
        let f = self.f.clone();
        let wrapped = Responder::new(move |action| responder.send(f(action)));
        self.inner.init(wrapped)
    }

    fn update(&self, state: &mut WidgetState, target: &mut WidgetTarget) -> Option<WidgetTarget> {
        self.inner.update(state, target)
    }

    fn destroy(&self, state: WidgetState, target: WidgetTarget) {
        self.inner.destroy(state, target)
    }
}
