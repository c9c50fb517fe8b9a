mod common;

use common::{app_store, ids};
use statefold::app::{configure_store, store_builder, COUNTER, TODOS};
use statefold::hooks::{use_add_todo, use_counter, use_todo_actions, use_todos};
use statefold::{add_todo, counter, Action, CounterState, Store, TodosState};

#[test]
fn test_configure_store_registers_both_slices() {
    let store = configure_store().unwrap();
    assert_eq!(store.slice_names(), vec![TODOS, COUNTER]);
    assert_eq!(use_todos(&store), TodosState::default());
    assert_eq!(use_counter(&store).count, 0);
}

#[test]
fn test_store_builder_accepts_history_settings() {
    let store = store_builder().record_history(false).build().unwrap();
    store.dispatch(add_todo("x"));
    assert!(store.history().is_empty());
    assert_eq!(use_todos(&store).len(), 4);
}

#[test]
fn test_use_add_todo() {
    let store = app_store();
    let add = use_add_todo(&store);
    add("buy milk");
    add("");

    let todos = use_todos(&store);
    assert_eq!(ids(&todos), vec![1, 2, 3, 4, 5]);
    assert_eq!(todos[3].text, "buy milk");
    assert_eq!(todos[4].text, "");
}

#[test]
fn test_use_todo_actions() {
    let store = app_store();
    let actions = use_todo_actions(&store, 3);
    assert_eq!(actions.id(), 3);

    actions.on_toggle();
    assert!(use_todos(&store).by_id(3).unwrap().done);

    actions.on_remove();
    assert!(!use_todos(&store).contains_id(3));

    // Bound to an id that is gone: both are silent no-ops.
    actions.on_toggle();
    actions.on_remove();
    assert_eq!(ids(&use_todos(&store)), vec![1, 2]);
}

#[test]
fn test_todo_actions_identity() {
    let store = app_store();
    let other = app_store();

    assert_eq!(use_todo_actions(&store, 1), use_todo_actions(&store, 1));
    assert_eq!(use_todo_actions(&store, 1), use_todo_actions(&store.clone(), 1));
    assert_ne!(use_todo_actions(&store, 1), use_todo_actions(&store, 2));
    assert_ne!(use_todo_actions(&store, 1), use_todo_actions(&other, 1));
}

#[test]
fn test_use_counter() {
    let store = app_store();
    let handle = use_counter(&store);
    handle.on_increase();
    handle.on_increase();
    handle.on_decrease();
    handle.on_increase_by(5);

    // The handle keeps the value it was created with.
    assert_eq!(handle.count, 0);
    assert_eq!(use_counter(&store).count, 6);
}

#[test]
fn test_use_todos_is_snapshot() {
    let store = app_store();
    let before = use_todos(&store);
    use_add_todo(&store)("x");
    assert_eq!(before.len(), 3);
    assert_eq!(use_todos(&store).len(), 4);
}

#[test]
fn test_hooks_on_store_without_slice_fall_back_to_default() {
    let store: Store<Action> = Store::builder()
        .slice_with_state("counter", counter, CounterState { count: 9 })
        .build()
        .unwrap();

    assert_eq!(use_todos(&store), TodosState::default());
    assert_eq!(use_counter(&store).count, 9);
}
