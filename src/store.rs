use crate::error::{Error, Result};
use crate::slice::{ReduceFn, Slice, SliceOps};
use log::{debug, trace, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<A> = Rc<dyn Fn(&Store<A>)>;

/// The application store: owns every slice and mediates dispatch,
/// subscription and history.
///
/// `Store` is a cheap handle. Clones share the same state, which is how
/// bound dispatchers (see [`crate::hooks`]) reach it later. It is
/// single-threaded by construction: dispatch runs every reducer to
/// completion, then notifies listeners, before returning.
///
/// # Examples
///
/// ```
/// use statefold::{add_todo, counter, todos, Action, CounterState, Store, TodosState};
///
/// let store: Store<Action> = Store::builder()
///     .slice::<TodosState>("todos", todos)
///     .slice::<CounterState>("counter", counter)
///     .build()
///     .unwrap();
///
/// assert!(store.dispatch(add_todo("x")));
/// let todos: TodosState = store.slice("todos").unwrap();
/// assert_eq!(todos.len(), 4);
/// ```
pub struct Store<A> {
    inner: Rc<Inner<A>>,
}

struct Inner<A> {
    root: RefCell<RootState<A>>,
    listeners: RefCell<Listeners<A>>,
}

struct RootState<A> {
    slices: Vec<Box<dyn SliceOps<A>>>,
    history: History<A>,
    version: u64,
}

struct History<A> {
    actions: VecDeque<A>,
    enabled: bool,
    limit: Option<usize>,
}

impl<A> History<A> {
    fn record(&mut self, action: A) {
        if !self.enabled {
            return;
        }
        self.actions.push_back(action);
        if let Some(limit) = self.limit {
            while self.actions.len() > limit {
                self.actions.pop_front();
            }
        }
    }
}

struct Listeners<A> {
    next_id: u64,
    entries: Vec<(u64, Listener<A>)>,
}

impl<A> Clone for Store<A> {
    fn clone(&self) -> Self {
        Store {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Store<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.inner.root.borrow();
        let names: Vec<&str> = root.slices.iter().map(|s| s.slice_name()).collect();
        f.debug_struct("Store")
            .field("slices", &names)
            .field("version", &root.version)
            .field("history_len", &root.history.actions.len())
            .field("listeners", &self.inner.listeners.borrow().entries.len())
            .finish()
    }
}

impl<A> Store<A>
where
    A: Clone + fmt::Debug + 'static,
{
    /// Create a builder for configuring slices and history.
    pub fn builder() -> StoreBuilder<A> {
        StoreBuilder::new()
    }

    /// Dispatch an action to every slice.
    ///
    /// Each slice reducer sees the same action. A slice whose reducer returns
    /// an equal state keeps its previous state. Listeners are notified after
    /// every dispatch, changed or not.
    ///
    /// Returns `true` if any slice changed.
    pub fn dispatch(&self, action: A) -> bool {
        let changed = {
            let mut root = self.inner.root.borrow_mut();
            let mut changed = false;
            for slice in root.slices.iter_mut() {
                changed |= slice.reduce_boxed(&action);
            }
            root.version += 1;
            debug!("dispatch #{} {action:?} changed={changed}", root.version);
            root.history.record(action);
            changed
        };
        self.notify();
        changed
    }

    /// Return a snapshot of the named slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSlice`] if no slice has this name, or
    /// [`Error::SliceTypeMismatch`] if it holds a state type other than `S`.
    pub fn slice<S>(&self, name: &str) -> Result<S>
    where
        S: Clone + 'static,
    {
        let root = self.inner.root.borrow();
        let ops = root
            .slices
            .iter()
            .find(|s| s.slice_name() == name)
            .ok_or_else(|| Error::UnknownSlice(name.to_string()))?;
        ops.as_any()
            .downcast_ref::<Slice<S, A>>()
            .map(|slice| slice.state().clone())
            .ok_or_else(|| Error::SliceTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<S>(),
            })
    }

    /// Names of the registered slices, in registration order.
    pub fn slice_names(&self) -> Vec<String> {
        let root = self.inner.root.borrow();
        root.slices
            .iter()
            .map(|s| s.slice_name().to_string())
            .collect()
    }

    /// Serialize the root state as a JSON object keyed by slice name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if a slice state fails to serialize.
    pub fn to_json(&self) -> Result<Value> {
        let root = self.inner.root.borrow();
        let mut map = Map::new();
        for slice in &root.slices {
            map.insert(slice.slice_name().to_string(), slice.state_json()?);
        }
        Ok(Value::Object(map))
    }

    /// Number of actions dispatched since the store was built.
    pub fn version(&self) -> u64 {
        self.inner.root.borrow().version
    }

    /// Recorded actions, oldest first.
    pub fn history(&self) -> Vec<A> {
        let root = self.inner.root.borrow();
        root.history.actions.iter().cloned().collect()
    }

    /// Reset every slice to its initial state and refold the recorded history.
    ///
    /// Listeners are notified afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HistoryTruncated`] if some dispatched actions are not
    /// in the history (recording disabled or limit reached). State is left
    /// untouched in that case.
    pub fn rebuild(&self) -> Result<()> {
        {
            let mut guard = self.inner.root.borrow_mut();
            let root = &mut *guard;
            let dropped = root.version - root.history.actions.len() as u64;
            if dropped > 0 {
                warn!("refusing rebuild: {dropped} action(s) missing from history");
                return Err(Error::HistoryTruncated { dropped });
            }
            for slice in root.slices.iter_mut() {
                slice.reset();
            }
            for action in &root.history.actions {
                for slice in root.slices.iter_mut() {
                    slice.reduce_boxed(action);
                }
            }
            debug!("rebuilt from {} action(s)", root.history.actions.len());
        }
        self.notify();
        Ok(())
    }

    /// Register a listener called after every dispatch.
    ///
    /// Listeners added or removed while a notification is running take
    /// effect from the next dispatch. A listener may dispatch.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<A>
    where
        F: Fn(&Store<A>) + 'static,
    {
        let mut listeners = self.inner.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        let listener: Listener<A> = Rc::new(listener);
        listeners.entries.push((id, listener));
        trace!("subscribe #{id}");
        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    /// Register a listener that fires only when the selected value changes.
    ///
    /// `select` runs once immediately to capture the current value, then
    /// after every dispatch; `on_change` receives the new value whenever it
    /// differs from the previous one.
    pub fn subscribe_selector<T, Sel, F>(&self, select: Sel, on_change: F) -> Subscription<A>
    where
        T: PartialEq + 'static,
        Sel: Fn(&Store<A>) -> T + 'static,
        F: Fn(&T) + 'static,
    {
        let last = RefCell::new(Rc::new(select(self)));
        self.subscribe(move |store| {
            let next = select(store);
            let current = {
                let mut last = last.borrow_mut();
                if **last == next {
                    return;
                }
                *last = Rc::new(next);
                Rc::clone(&last)
            };
            on_change(&current);
        })
    }

    /// Number of active subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().entries.len()
    }

    /// Returns `true` if both handles point at the same store.
    pub fn ptr_eq(&self, other: &Store<A>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self) {
        let listeners: Vec<Listener<A>> = self
            .inner
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(self);
        }
    }
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping it leaves the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription<A> {
    id: u64,
    store: Weak<Inner<A>>,
}

impl<A> fmt::Debug for Subscription<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl<A> Subscription<A> {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the listener. Returns `false` if the store is gone or the
    /// listener was already removed.
    pub fn unsubscribe(self) -> bool {
        let Some(inner) = self.store.upgrade() else {
            return false;
        };
        let mut listeners = inner.listeners.borrow_mut();
        let before = listeners.entries.len();
        listeners.entries.retain(|(id, _)| *id != self.id);
        trace!("unsubscribe #{}", self.id);
        listeners.entries.len() != before
    }
}

/// Builder for configuring a [`Store`] before creating it.
///
/// # Examples
///
/// ```
/// use statefold::{counter, Action, CounterState, Store};
///
/// let store: Store<Action> = Store::builder()
///     .slice_with_state("counter", counter, CounterState { count: 10 })
///     .history_limit(100)
///     .build()
///     .unwrap();
///
/// assert_eq!(store.slice::<CounterState>("counter").unwrap().count, 10);
/// ```
pub struct StoreBuilder<A> {
    slices: Vec<Box<dyn SliceOps<A>>>,
    record_history: bool,
    history_limit: Option<usize>,
}

impl<A> fmt::Debug for StoreBuilder<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.slices.iter().map(|s| s.slice_name()).collect();
        f.debug_struct("StoreBuilder")
            .field("slices", &names)
            .field("record_history", &self.record_history)
            .field("history_limit", &self.history_limit)
            .finish()
    }
}

impl<A> Default for StoreBuilder<A>
where
    A: Clone + fmt::Debug + 'static,
{
    fn default() -> Self {
        StoreBuilder::new()
    }
}

impl<A> StoreBuilder<A>
where
    A: Clone + fmt::Debug + 'static,
{
    pub fn new() -> Self {
        StoreBuilder {
            slices: Vec::new(),
            record_history: true,
            history_limit: None,
        }
    }

    /// Register a slice starting from `S::default()`.
    pub fn slice<S>(self, name: &str, reducer: ReduceFn<S, A>) -> Self
    where
        S: Serialize + Default + Clone + PartialEq + 'static,
    {
        self.slice_with_state(name, reducer, S::default())
    }

    /// Register a slice starting from `initial`.
    pub fn slice_with_state<S>(mut self, name: &str, reducer: ReduceFn<S, A>, initial: S) -> Self
    where
        S: Serialize + Clone + PartialEq + 'static,
    {
        self.slices.push(Box::new(Slice::new(name, reducer, initial)));
        self
    }

    /// Record dispatched actions (default `true`).
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    /// Keep at most `limit` actions, dropping the oldest.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Create the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSlice`] if two slices share a name.
    pub fn build(self) -> Result<Store<A>> {
        let mut seen = HashSet::new();
        for slice in &self.slices {
            if !seen.insert(slice.slice_name()) {
                return Err(Error::DuplicateSlice(slice.slice_name().to_string()));
            }
        }

        debug!("store built with {} slice(s)", self.slices.len());

        Ok(Store {
            inner: Rc::new(Inner {
                root: RefCell::new(RootState {
                    slices: self.slices,
                    history: History {
                        actions: VecDeque::new(),
                        enabled: self.record_history,
                        limit: self.history_limit,
                    },
                    version: 0,
                }),
                listeners: RefCell::new(Listeners {
                    next_id: 0,
                    entries: Vec::new(),
                }),
            }),
        })
    }
}
