//! Minimal todo app — the "hello world" of statefold.

use statefold::app::configure_store;
use statefold::hooks::{use_add_todo, use_counter, use_todo_actions, use_todos};
use statefold::Action;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = configure_store()?;

    let rendered = store.subscribe_selector(use_todos, |todos| {
        println!("-- {} todo(s), {} remaining", todos.len(), todos.remaining());
    });

    let add = use_add_todo(&store);
    add("x");
    println!("Added: x");

    use_todo_actions(&store, 2).on_toggle();
    println!("Toggled: 2");

    use_todo_actions(&store, 1).on_remove();
    println!("Removed: 1");

    let counter = use_counter(&store);
    counter.on_increase();
    counter.on_increase_by(5);
    println!("Counter: {}", use_counter(&store).count);

    println!("\nTodos:");
    for todo in &use_todos(&store) {
        let check = if todo.done { "x" } else { " " };
        println!("  [{}] {} {}", check, todo.id, todo.text);
    }

    println!("\nHistory:");
    for action in store.history() {
        println!("  {}", action.to_json()?);
    }

    // Replaying the recorded JSON lands on the same state.
    let replayed = configure_store()?;
    for action in store.history() {
        replayed.dispatch(Action::from_json(&action.to_json()?)?);
    }
    assert_eq!(replayed.to_json()?, store.to_json()?);

    println!("\nState:\n{}", serde_json::to_string_pretty(&store.to_json()?)?);

    rendered.unsubscribe();
    Ok(())
}
