//! Effect contexts.
//!
//! Every action inside a view is wrapped in an effect context `M`: the
//! tree's action type is `M::Of<T>`. [`Pure`] carries plain messages,
//! [`Deferred`] carries shared nullary closures the driver runs. A
//! [`ContextTransform`] swaps one context for another wholesale: its
//! `transform` method is generic over the wrapped type, so it cannot
//! special-case any particular message and behaves as a
//! structure-preserving map (which is what makes substituting a mock
//! context in tests sound).

use std::fmt;
use std::rc::Rc;

/// A type constructor for actions: `Of<T>` wraps a message of type `T`.
pub trait Context: 'static {
    type Of<T: Clone + 'static>: Clone + 'static;

    /// Wrap a plain message.
    fn pure<T: Clone + 'static>(value: T) -> Self::Of<T>;

    /// Map the wrapped message without running the effect.
    fn map<T: Clone + 'static, U: Clone + 'static>(
        of: Self::Of<T>,
        f: impl Fn(T) -> U + 'static,
    ) -> Self::Of<U>;
}

/// A context whose effects the driver can execute to completion.
pub trait RunContext: Context {
    fn run<T: Clone + 'static>(of: Self::Of<T>) -> T;
}

/// Actions are the messages themselves.
pub struct Pure;

impl Context for Pure {
    type Of<T: Clone + 'static> = T;

    fn pure<T: Clone + 'static>(value: T) -> T {
        value
    }

    fn map<T: Clone + 'static, U: Clone + 'static>(of: T, f: impl Fn(T) -> U + 'static) -> U {
        f(of)
    }
}

impl RunContext for Pure {
    fn run<T: Clone + 'static>(of: T) -> T {
        of
    }
}

/// A shared nullary closure producing a message when run.
pub struct Thunk<T>(Rc<dyn Fn() -> T>);

impl<T> Thunk<T> {
    pub fn new(f: impl Fn() -> T + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn run(&self) -> T {
        (self.0)()
    }
}

impl<T> Clone for Thunk<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> fmt::Debug for Thunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk")
    }
}

/// Actions are deferred computations run by the driver.
pub struct Deferred;

impl Context for Deferred {
    type Of<T: Clone + 'static> = Thunk<T>;

    fn pure<T: Clone + 'static>(value: T) -> Thunk<T> {
        Thunk::new(move || value.clone())
    }

    fn map<T: Clone + 'static, U: Clone + 'static>(
        of: Thunk<T>,
        f: impl Fn(T) -> U + 'static,
    ) -> Thunk<U> {
        Thunk::new(move || f(of.run()))
    }
}

impl RunContext for Deferred {
    fn run<T: Clone + 'static>(of: Thunk<T>) -> T {
        of.run()
    }
}

/// A structure-preserving swap of effect contexts.
pub trait ContextTransform<M: Context, N: Context> {
    fn transform<T: Clone + 'static>(&self, of: M::Of<T>) -> N::Of<T>;
}

/// Collapse any runnable context into [`Pure`] by executing its effects.
pub struct Evaluate;

impl<M: RunContext> ContextTransform<M, Pure> for Evaluate {
    fn transform<T: Clone + 'static>(&self, of: M::Of<T>) -> T {
        M::run(of)
    }
}

/// Lift [`Pure`] messages into [`Deferred`] thunks.
pub struct Suspend;

impl ContextTransform<Pure, Deferred> for Suspend {
    fn transform<T: Clone + 'static>(&self, of: T) -> Thunk<T> {
        Deferred::pure(of)
    }
}
