mod action;
pub mod app;
mod counter;
mod error;
pub mod hooks;
mod slice;
mod store;
mod todos;

pub use action::{
    add_todo, decrease, increase, increase_by, is_known_action_type, remove_todo, toggle_todo,
    Action, CounterAction, RawAction, TodoAction, ADD_TODO, DECREASE, INCREASE, INCREASE_BY,
    REMOVE_TODO, TOGGLE_TODO,
};
pub use counter::{counter, CounterState};
pub use error::{Error, Result};
pub use slice::{replay, ReduceFn, Slice, SliceOps};
pub use store::{Store, StoreBuilder, Subscription};
pub use todos::{todos, Todo, TodosState};
