//! Plain-text rendering of the controller state.

use std::fmt::Write;

use todo_core::{TodoItem, TodoListState};

/// One line per item in server order, then the error line if any.
pub fn render(state: &TodoListState) -> String {
    let mut out = String::new();
    if state.items.is_empty() {
        out.push_str("(no todos)\n");
    }
    for item in &state.items {
        out.push_str(&render_item(item));
        out.push('\n');
    }
    if let Some(err) = &state.error {
        let _ = writeln!(out, "error: {err}");
    }
    out
}

pub fn render_item(item: &TodoItem) -> String {
    let mark = if item.completed { 'x' } else { ' ' };
    format!("[{mark}] {:>3}  {}", item.id, item.title)
}
