//! Store wiring for the todo application.

use crate::action::Action;
use crate::counter::{counter, CounterState};
use crate::error::Result;
use crate::store::{Store, StoreBuilder};
use crate::todos::{todos, TodosState};

/// Name of the todo list slice.
pub const TODOS: &str = "todos";
/// Name of the counter slice.
pub const COUNTER: &str = "counter";

/// Builder with both application slices registered, for callers that want
/// to adjust history settings before building.
pub fn store_builder() -> StoreBuilder<Action> {
    Store::builder()
        .slice::<TodosState>(TODOS, todos)
        .slice::<CounterState>(COUNTER, counter)
}

/// Build the application store with the `todos` and `counter` slices at
/// their seed state.
///
/// # Errors
///
/// Only fails if slice registration is inconsistent, which the fixed wiring
/// here rules out; the `Result` mirrors [`StoreBuilder::build`].
///
/// # Examples
///
/// ```
/// use statefold::app::configure_store;
/// use statefold::hooks::use_todos;
///
/// let store = configure_store().unwrap();
/// assert_eq!(store.slice_names(), vec!["todos", "counter"]);
/// assert_eq!(use_todos(&store).len(), 3);
/// ```
pub fn configure_store() -> Result<Store<Action>> {
    store_builder().build()
}
