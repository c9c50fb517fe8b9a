use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;

/// A pure function that folds an action into state.
///
/// Reducers receive owned state and return owned state. They should be pure
/// (no I/O, no side effects) and return their input untouched for actions
/// they do not handle.
///
/// # Examples
///
/// ```
/// use statefold::{Action, ReduceFn};
///
/// fn dispatched(state: u64, _action: &Action) -> u64 {
///     state + 1
/// }
///
/// let reducer: ReduceFn<u64, Action> = dispatched;
/// ```
pub type ReduceFn<S, A> = fn(S, &A) -> S;

/// Fold a sequence of actions over `initial`.
///
/// Stopping early gives the state at any intermediate point, which is how
/// a recorded [`Store::history`](crate::Store::history) is inspected.
///
/// # Examples
///
/// ```
/// use statefold::{add_todo, replay, todos, toggle_todo, TodosState};
///
/// let actions = [add_todo("x"), toggle_todo(4)];
/// let state = replay(TodosState::default(), todos, &actions[..1]);
/// assert!(!state.by_id(4).unwrap().done);
/// let state = replay(TodosState::default(), todos, &actions);
/// assert!(state.by_id(4).unwrap().done);
/// ```
pub fn replay<'a, S, A, I>(initial: S, reducer: ReduceFn<S, A>, actions: I) -> S
where
    A: 'a,
    I: IntoIterator<Item = &'a A>,
{
    actions
        .into_iter()
        .fold(initial, |state, action| reducer(state, action))
}

mod sealed {
    pub trait Sealed {}
}

/// Trait for type-erased slice operations inside a store.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait SliceOps<A>: sealed::Sealed {
    /// Fold one action into the slice. Returns `true` if the state changed.
    fn reduce_boxed(&mut self, action: &A) -> bool;
    /// Put the slice back to its initial state.
    fn reset(&mut self);
    /// Returns the slice name.
    fn slice_name(&self) -> &str;
    /// Serialize the current state.
    fn state_json(&self) -> Result<Value>;
    /// Downcast to `&dyn Any` for type recovery.
    fn as_any(&self) -> &dyn Any;
}

/// A named portion of root state, owned by one reducer.
pub struct Slice<S, A> {
    name: String,
    reducer: ReduceFn<S, A>,
    initial: S,
    state: S,
}

impl<S: std::fmt::Debug, A> std::fmt::Debug for Slice<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slice")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish()
    }
}

impl<S: Clone + PartialEq, A> Slice<S, A> {
    /// Create a slice whose state starts at `initial`.
    pub fn new(name: &str, reducer: ReduceFn<S, A>, initial: S) -> Self {
        Slice {
            name: name.to_string(),
            reducer,
            state: initial.clone(),
            initial,
        }
    }

    /// Run the reducer and keep the result. Returns `true` if the new
    /// state differs from the old one.
    pub fn reduce(&mut self, action: &A) -> bool {
        let previous = self.state.clone();
        let next = (self.reducer)(previous, action);
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }
}

impl<S, A> Slice<S, A> {
    /// Return a reference to the current state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Returns the slice name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S, A> sealed::Sealed for Slice<S, A> {}

impl<S, A> SliceOps<A> for Slice<S, A>
where
    S: Serialize + Clone + PartialEq + 'static,
    A: 'static,
{
    fn reduce_boxed(&mut self, action: &A) -> bool {
        self.reduce(action)
    }

    fn reset(&mut self) {
        self.state = self.initial.clone();
    }

    fn slice_name(&self) -> &str {
        &self.name
    }

    fn state_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.state)?)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
