//! Read projections and bound dispatchers for view code.
//!
//! Each hook takes the store handle and returns either a snapshot or a small
//! value that dispatches on the caller's behalf. None of them fail: a store
//! missing the slice a hook reads logs a warning and yields the slice
//! default.

use crate::action::{add_todo, decrease, increase, increase_by, remove_todo, toggle_todo, Action};
use crate::app::{COUNTER, TODOS};
use crate::counter::CounterState;
use crate::store::Store;
use crate::todos::TodosState;
use log::warn;

fn read_slice<S>(store: &Store<Action>, name: &str) -> S
where
    S: Clone + Default + 'static,
{
    store.slice::<S>(name).unwrap_or_else(|e| {
        warn!("hook could not read slice: {e}");
        S::default()
    })
}

/// Current todo list.
pub fn use_todos(store: &Store<Action>) -> TodosState {
    read_slice(store, TODOS)
}

/// A dispatcher that appends a todo with the given text.
pub fn use_add_todo(store: &Store<Action>) -> impl Fn(&str) + Clone + 'static {
    let store = store.clone();
    move |text: &str| {
        store.dispatch(add_todo(text));
    }
}

/// Toggle and remove dispatchers bound to one todo id.
///
/// Two `TodoActions` are equal when they target the same store and id, so a
/// caller can keep the old value and skip work when nothing relevant moved.
#[derive(Clone)]
pub struct TodoActions {
    store: Store<Action>,
    id: u64,
}

impl TodoActions {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn on_toggle(&self) {
        self.store.dispatch(toggle_todo(self.id));
    }

    pub fn on_remove(&self) {
        self.store.dispatch(remove_todo(self.id));
    }
}

impl PartialEq for TodoActions {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.store.ptr_eq(&other.store)
    }
}

impl Eq for TodoActions {}

impl std::fmt::Debug for TodoActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoActions").field("id", &self.id).finish()
    }
}

/// Bound dispatchers for the todo with `id`.
pub fn use_todo_actions(store: &Store<Action>, id: u64) -> TodoActions {
    TodoActions {
        store: store.clone(),
        id,
    }
}

/// The counter value at the time of the call, plus its dispatchers.
#[derive(Clone)]
pub struct CounterHandle {
    pub count: i64,
    store: Store<Action>,
}

impl CounterHandle {
    pub fn on_increase(&self) {
        self.store.dispatch(increase());
    }

    pub fn on_decrease(&self) {
        self.store.dispatch(decrease());
    }

    pub fn on_increase_by(&self, diff: i64) {
        self.store.dispatch(increase_by(diff));
    }
}

impl std::fmt::Debug for CounterHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterHandle")
            .field("count", &self.count)
            .finish()
    }
}

pub fn use_counter(store: &Store<Action>) -> CounterHandle {
    let state: CounterState = read_slice(store, COUNTER);
    CounterHandle {
        count: state.count,
        store: store.clone(),
    }
}
