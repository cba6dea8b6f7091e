use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

/// Payload delivered to an event hook when the driver fires an event.
#[derive(Clone, Debug, PartialEq)]
pub enum EventPayload {
    Unit,
    Text(Arc<str>),
    Number(f64),
    Bool(bool),
}

impl EventPayload {
    pub fn text(value: impl Into<Arc<str>>) -> Self {
        EventPayload::Text(value.into())
    }
}

/// A plain attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Text(Arc<str>),
    Number(f64),
    Bool(bool),
}

impl PropValue {
    /// Convert the value to a display string for snapshots and logs.
    pub fn to_display_string(&self) -> String {
        match self {
            PropValue::Text(s) => s.to_string(),
            PropValue::Number(n) => n.to_string(),
            PropValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.into())
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

/// An event hook attached under an attribute key.
///
/// `emit` turns the fired event payload into an action. `attach` and
/// `detach` are emitted by the patch layer when the hook is installed on or
/// removed from a live node (not when an existing hook's callback is
/// swapped during an update).
pub struct EventHook<A> {
    pub emit: Rc<dyn Fn(EventPayload) -> A>,
    pub attach: Option<A>,
    pub detach: Option<A>,
}

impl<A> EventHook<A> {
    pub fn new(emit: impl Fn(EventPayload) -> A + 'static) -> Self {
        Self {
            emit: Rc::new(emit),
            attach: None,
            detach: None,
        }
    }

    pub fn with_attach(mut self, action: A) -> Self {
        self.attach = Some(action);
        self
    }

    pub fn with_detach(mut self, action: A) -> Self {
        self.detach = Some(action);
        self
    }

    pub fn run(&self, payload: EventPayload) -> A {
        (self.emit)(payload)
    }
}

impl<A: Clone + 'static> EventHook<A> {
    pub(crate) fn map_with<B: Clone + 'static>(&self, f: &Rc<dyn Fn(A) -> B>) -> EventHook<B> {
        let emit = self.emit.clone();
        let mapped = f.clone();
        EventHook {
            emit: Rc::new(move |payload| mapped(emit(payload))),
            attach: self.attach.clone().map(|a| f(a)),
            detach: self.detach.clone().map(|a| f(a)),
        }
    }
}

impl<A: Clone> Clone for EventHook<A> {
    fn clone(&self) -> Self {
        Self {
            emit: self.emit.clone(),
            attach: self.attach.clone(),
            detach: self.detach.clone(),
        }
    }
}

impl<A> fmt::Debug for EventHook<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHook")
    }
}

/// One attribute: either a plain value or an event hook.
#[derive(Clone)]
pub enum Prop<A> {
    Value(PropValue),
    Hook(EventHook<A>),
}

impl<A> fmt::Debug for Prop<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Prop::Hook(hook) => f.debug_tuple("Hook").field(hook).finish(),
        }
    }
}

/// Whether two props are unchanged for diffing purposes.
///
/// Hook callbacks are closures and cannot be compared structurally; a hook
/// counts as unchanged only when the same `Rc` callback is reused between
/// renders.
pub fn prop_unchanged<A>(prev: &Prop<A>, next: &Prop<A>) -> bool {
    match (prev, next) {
        (Prop::Value(a), Prop::Value(b)) => a == b,
        (Prop::Hook(a), Prop::Hook(b)) => Rc::ptr_eq(&a.emit, &b.emit),
        _ => false,
    }
}

/// A finite mapping from attribute keys to props.
///
/// Merge is right-biased: for overlapping keys the second set wins. The
/// empty set is the merge identity, which is what lets several
/// declaratively built attribute fragments be unioned onto one node.
#[derive(Clone)]
pub struct Props<A> {
    entries: IndexMap<Arc<str>, Prop<A>>,
}

impl<A> Default for Props<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Props<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<A> Props<A> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<Arc<str>>, value: impl Into<PropValue>) -> Self {
        self.entries.insert(key.into(), Prop::Value(value.into()));
        self
    }

    pub fn with_hook(mut self, key: impl Into<Arc<str>>, hook: EventHook<A>) -> Self {
        self.entries.insert(key.into(), Prop::Hook(hook));
        self
    }

    pub fn insert(&mut self, key: impl Into<Arc<str>>, prop: Prop<A>) -> Option<Prop<A>> {
        self.entries.insert(key.into(), prop)
    }

    pub fn remove(&mut self, key: &str) -> Option<Prop<A>> {
        self.entries.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Prop<A>> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &Prop<A>)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Arc<str>> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Right-biased union: keys of `other` overwrite keys of `self`.
    pub fn merge(mut self, other: Props<A>) -> Props<A> {
        for (key, prop) in other.entries {
            self.entries.insert(key, prop);
        }
        self
    }
}

impl<A: Clone + 'static> Props<A> {
    pub(crate) fn map_action_with<B: Clone + 'static>(&self, f: &Rc<dyn Fn(A) -> B>) -> Props<B> {
        let entries = self
            .entries
            .iter()
            .map(|(key, prop)| {
                let prop = match prop {
                    Prop::Value(value) => Prop::Value(value.clone()),
                    Prop::Hook(hook) => Prop::Hook(hook.map_with(f)),
                };
                (key.clone(), prop)
            })
            .collect();
        Props { entries }
    }
}
