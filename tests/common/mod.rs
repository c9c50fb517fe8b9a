#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::json;
use statefold::{counter, todos, Action, CounterState, RawAction, Store, Todo, TodosState};
use std::cell::RefCell;
use std::rc::Rc;

pub fn foreign_action(action_type: &str) -> Action {
    Action::Other(RawAction::new(action_type, json!({"key": "value"})).unwrap())
}

pub fn todos_of(items: &[(u64, &str, bool)]) -> TodosState {
    items
        .iter()
        .map(|&(id, text, done)| Todo::new(id, text, done))
        .collect()
}

pub fn ids(state: &TodosState) -> Vec<u64> {
    state.iter().map(|todo| todo.id).collect()
}

pub fn app_store() -> Store<Action> {
    Store::builder()
        .slice::<TodosState>("todos", todos)
        .slice::<CounterState>("counter", counter)
        .build()
        .unwrap()
}

pub fn dispatch_counter(state: u64, _action: &Action) -> u64 {
    state + 1
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatsState {
    pub dispatched: u64,
    pub last_action_type: String,
}

pub fn stats_reducer(mut state: StatsState, action: &Action) -> StatsState {
    state.dispatched += 1;
    state.last_action_type = action.action_type().to_string();
    state
}

/// Shared call counter for listener tests.
pub fn call_counter() -> (Rc<RefCell<u32>>, impl Fn(&Store<Action>) + 'static) {
    let calls = Rc::new(RefCell::new(0));
    let inner = Rc::clone(&calls);
    (calls, move |_: &Store<Action>| *inner.borrow_mut() += 1)
}
