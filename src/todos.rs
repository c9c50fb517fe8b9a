//! The `todos` slice: state, seed records and reducer.

use crate::action::{Action, TodoAction};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// A single todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

impl Todo {
    pub fn new(id: u64, text: impl Into<String>, done: bool) -> Self {
        Todo {
            id,
            text: text.into(),
            done,
        }
    }
}

/// The ordered, immutable list of todos.
///
/// Both the list and each record live behind shared pointers, so cloning a
/// `TodosState` is cheap and readers can hold a snapshot while the store
/// moves on. The reducer never edits a list in place: a transition either
/// returns the input unchanged (pointer-equal, see [`TodosState::ptr_eq`]) or
/// builds a new list that reuses every record it did not touch.
///
/// `Default` yields the three seed records.
///
/// # Examples
///
/// ```
/// use statefold::TodosState;
///
/// let todos = TodosState::default();
/// assert_eq!(todos.len(), 3);
/// assert_eq!(todos.next_id(), Some(4));
/// assert!(todos.by_id(2).unwrap().done);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodosState {
    items: Arc<[Arc<Todo>]>,
}

impl TodosState {
    /// A list with no todos.
    pub fn empty() -> Self {
        TodosState {
            items: Arc::from(Vec::new()),
        }
    }

    /// The id the next added todo receives: one past the largest id, or `1`
    /// when the list is empty. `None` once `u64::MAX` is taken.
    pub fn next_id(&self) -> Option<u64> {
        match self.items.iter().map(|todo| todo.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Look up a todo by id.
    pub fn by_id(&self, id: u64) -> Option<&Todo> {
        self.items
            .iter()
            .find(|todo| todo.id == id)
            .map(|todo| &**todo)
    }

    pub fn contains_id(&self, id: u64) -> bool {
        self.by_id(id).is_some()
    }

    /// Returns `true` if both states share the same underlying list.
    pub fn ptr_eq(&self, other: &TodosState) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Owned copies of the records, in order.
    pub fn records(&self) -> Vec<Todo> {
        self.items.iter().map(|todo| Todo::clone(todo)).collect()
    }

    /// Number of todos with `done == false`.
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|todo| !todo.done).count()
    }
}

impl Default for TodosState {
    fn default() -> Self {
        TodosState::from(vec![
            Todo::new(1, "Learn typescript", true),
            Todo::new(2, "Use typescript with redux", true),
            Todo::new(3, "Making Todo List", false),
        ])
    }
}

impl Deref for TodosState {
    type Target = [Arc<Todo>];

    fn deref(&self) -> &[Arc<Todo>] {
        &self.items
    }
}

impl From<Vec<Todo>> for TodosState {
    fn from(items: Vec<Todo>) -> Self {
        items.into_iter().collect()
    }
}

impl FromIterator<Todo> for TodosState {
    fn from_iter<I: IntoIterator<Item = Todo>>(iter: I) -> Self {
        iter.into_iter().map(Arc::new).collect()
    }
}

impl FromIterator<Arc<Todo>> for TodosState {
    fn from_iter<I: IntoIterator<Item = Arc<Todo>>>(iter: I) -> Self {
        TodosState {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TodosState {
    type Item = &'a Arc<Todo>;
    type IntoIter = std::slice::Iter<'a, Arc<Todo>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Reducer for the `todos` slice.
///
/// Toggle and remove on an id that is not present return `state` untouched.
/// Every action this reducer does not own falls through to the identity arm.
/// Records a transition does not touch are carried over by pointer.
///
/// Add is a no-op once the list holds a todo with id `u64::MAX`, since no
/// larger id exists.
///
/// # Examples
///
/// ```
/// use statefold::{add_todo, remove_todo, todos, TodosState};
///
/// let state = todos(TodosState::default(), &add_todo("x"));
/// assert_eq!(state.len(), 4);
/// assert_eq!(state[3].id, 4);
///
/// let state = todos(state, &remove_todo(1));
/// assert!(!state.contains_id(1));
/// ```
pub fn todos(state: TodosState, action: &Action) -> TodosState {
    let Action::Todos(action) = action else {
        return state;
    };

    match action {
        TodoAction::Add(text) => {
            let Some(id) = state.next_id() else {
                return state;
            };
            let todo = Arc::new(Todo::new(id, text.clone(), false));
            state.iter().cloned().chain(std::iter::once(todo)).collect()
        }
        TodoAction::Toggle(id) => {
            if !state.contains_id(*id) {
                return state;
            }
            state
                .iter()
                .map(|todo| {
                    if todo.id == *id {
                        Arc::new(Todo {
                            done: !todo.done,
                            ..Todo::clone(todo)
                        })
                    } else {
                        Arc::clone(todo)
                    }
                })
                .collect()
        }
        TodoAction::Remove(id) => {
            if !state.contains_id(*id) {
                return state;
            }
            state.iter().filter(|todo| todo.id != *id).cloned().collect()
        }
    }
}
