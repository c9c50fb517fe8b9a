mod common;

use common::{app_store, foreign_action};
use proptest::prelude::*;
use statefold::{
    add_todo, counter, decrease, increase, increase_by, remove_todo, replay, todos, toggle_todo,
    Action, CounterState, TodosState,
};

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(|text| add_todo(text)),
        (0u64..8).prop_map(toggle_todo),
        (0u64..8).prop_map(remove_todo),
        Just(increase()),
        Just(decrease()),
        (-50i64..50).prop_map(increase_by),
        Just(foreign_action("other/THING")),
    ]
}

fn arb_action_sequence() -> impl Strategy<Value = Vec<Action>> {
    proptest::collection::vec(arb_action(), 0..40)
}

fn arb_todos() -> impl Strategy<Value = TodosState> {
    proptest::collection::vec(arb_action(), 0..20)
        .prop_map(|actions| replay(TodosState::default(), todos, &actions))
}

// Ids stay unique whatever sequence of actions is applied.
proptest! {
    #[test]
    fn prop_ids_unique(actions in arb_action_sequence()) {
        let state = replay(TodosState::default(), todos, &actions);
        let mut ids: Vec<u64> = state.iter().map(|t| t.id).collect();
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), len);
    }
}

// Adding grows the list by one with a fresh, larger id.
proptest! {
    #[test]
    fn prop_add(state in arb_todos(), text in "[a-z]{0,8}") {
        let next = todos(state.clone(), &add_todo(text.clone()));
        prop_assert_eq!(next.len(), state.len() + 1);
        let last = next.last().unwrap();
        prop_assert!(!last.done);
        prop_assert_eq!(&last.text, &text);
        prop_assert!(state.iter().all(|t| t.id < last.id));
        prop_assert_eq!(&next[..state.len()], &state[..]);
    }
}

// Toggle flips exactly the matching record.
proptest! {
    #[test]
    fn prop_toggle(state in arb_todos(), id in 0u64..8) {
        let next = todos(state.clone(), &toggle_todo(id));
        prop_assert_eq!(next.len(), state.len());
        for (before, after) in state.iter().zip(next.iter()) {
            prop_assert_eq!(before.id, after.id);
            prop_assert_eq!(&before.text, &after.text);
            if before.id == id {
                prop_assert_eq!(after.done, !before.done);
            } else {
                prop_assert_eq!(after.done, before.done);
            }
        }
    }
}

// Remove drops the id if present, and applying it twice changes nothing more.
proptest! {
    #[test]
    fn prop_remove(state in arb_todos(), id in 0u64..8) {
        let once = todos(state.clone(), &remove_todo(id));
        let expected = if state.contains_id(id) { state.len() - 1 } else { state.len() };
        prop_assert_eq!(once.len(), expected);
        prop_assert!(!once.contains_id(id));

        let twice = todos(once.clone(), &remove_todo(id));
        prop_assert_eq!(twice, once);
    }
}

// Foreign actions leave every slice pointer-equal.
proptest! {
    #[test]
    fn prop_unknown_action_identity(state in arb_todos(), tag in "[a-z]{1,6}/[A-Z_]{1,10}") {
        let next = todos(state.clone(), &foreign_action(&tag));
        prop_assert!(next.ptr_eq(&state));
    }
}

// A store with both slices ends where manual folds of each reducer end,
// and rebuilding from history lands on the same root state.
proptest! {
    #[test]
    fn prop_store_matches_manual_fold(actions in arb_action_sequence()) {
        let store = app_store();
        for action in &actions {
            store.dispatch(action.clone());
        }

        let manual_todos = replay(TodosState::default(), todos, &actions);
        let manual_counter = replay(CounterState::default(), counter, &actions);

        prop_assert_eq!(store.slice::<TodosState>("todos").unwrap(), manual_todos);
        prop_assert_eq!(store.slice::<CounterState>("counter").unwrap(), manual_counter);

        let live = store.to_json().unwrap();
        store.rebuild().unwrap();
        prop_assert_eq!(store.to_json().unwrap(), live);
    }
}

// The JSON wire form decodes back to the same action.
proptest! {
    #[test]
    fn prop_wire_form_decodes(actions in arb_action_sequence()) {
        for action in &actions {
            let json = action.to_json().unwrap();
            prop_assert_eq!(&Action::from_json(&json).unwrap(), action);
        }
    }
}
