//! The `counter` slice. Independent of the todo list.

use crate::action::{Action, CounterAction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub count: i64,
}

/// Reducer for the `counter` slice. Arithmetic saturates at the `i64` bounds.
pub fn counter(state: CounterState, action: &Action) -> CounterState {
    let Action::Counter(action) = action else {
        return state;
    };

    let count = match action {
        CounterAction::Increase => state.count.saturating_add(1),
        CounterAction::Decrease => state.count.saturating_sub(1),
        CounterAction::IncreaseBy(diff) => state.count.saturating_add(*diff),
    };
    CounterState { count }
}
