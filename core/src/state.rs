//! Application state and the pure transition table.
//!
//! `transition` is the only code that produces a new `AppState`. It does no
//! I/O and never fails; every (state, event) pair has a defined successor.

use std::collections::HashSet;

use crate::event::{Event, Outcome};
use crate::types::Todo;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Server response order, with later additions appended.
    pub todos: Vec<Todo>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AppState {
    pub fn todo(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }
}

pub fn transition(state: &AppState, event: &Event) -> AppState {
    let mut next = state.clone();
    match event {
        Event::Intent(_) => {
            next.loading = true;
            next.error = None;
        }

        Event::Outcome(outcome) => {
            next.loading = false;
            match outcome {
                Outcome::Loaded(todos) => next.todos = dedup_by_id(todos),
                Outcome::Added(todo) => next.todos.push(todo.clone()),
                Outcome::Updated(todo) => {
                    // Only the entry with the same id is replaced.
                    for existing in next.todos.iter_mut().filter(|t| t.id == todo.id) {
                        *existing = todo.clone();
                    }
                }
                Outcome::Deleted(id) => next.todos.retain(|t| t.id != *id),
                Outcome::LoadFailed(message)
                | Outcome::AddFailed(message)
                | Outcome::UpdateFailed(message)
                | Outcome::DeleteFailed(message) => next.error = Some(message.clone()),
            }
        }
    }
    next
}

/// First occurrence of each id wins.
fn dedup_by_id(todos: &[Todo]) -> Vec<Todo> {
    let mut seen = HashSet::with_capacity(todos.len());
    todos.iter().filter(|t| seen.insert(t.id)).cloned().collect()
}
