//! Text rendering of `AppState` and translation of user input to intents.
//!
//! The view only reads snapshots. Everything it wants changed goes back to
//! the store as an `Intent`.

use std::fmt::Write as _;

use crate::event::Intent;
use crate::state::AppState;
use crate::types::TodoId;

pub const TITLE: &str = "TODO App";
pub const LOADING_MESSAGE: &str = "Loading todos...";
pub const EMPTY_MESSAGE: &str = "No todos yet. Add one above!";

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Enter pressed in the input box holding `text`.
    EnterKey(String),
    /// The add button clicked while the input box holds `text`.
    AddClicked(String),
    CheckboxChanged(TodoId),
    DeleteClicked(TodoId),
}

/// The add button is disabled while a request is in flight.
pub fn add_enabled(state: &AppState) -> bool {
    !state.loading
}

pub fn add_label(state: &AppState) -> &'static str {
    if state.loading {
        "Adding..."
    } else {
        "Add"
    }
}

/// Maps one piece of user input to the intent it requests, if any.
///
/// Blank text never produces an add. A disabled add button ignores clicks,
/// but Enter in the input box still submits. Toggling a todo that is not in
/// the current list does nothing.
pub fn intent_for(state: &AppState, input: UserInput, owner_id: u64) -> Option<Intent> {
    match input {
        UserInput::AddClicked(_) if !add_enabled(state) => None,
        UserInput::EnterKey(text) | UserInput::AddClicked(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(Intent::Add {
                text: text.to_string(),
                owner_id,
            })
        }
        UserInput::CheckboxChanged(id) => state.todo(id).map(|todo| Intent::Update {
            id,
            completed: Some(!todo.completed),
            text: None,
        }),
        UserInput::DeleteClicked(id) => Some(Intent::Delete { id }),
    }
}

/// Renders the whole screen.
pub fn render(state: &AppState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out);

    let button = if add_enabled(state) {
        format!("[{}]", add_label(state))
    } else {
        format!("[{}] (disabled)", add_label(state))
    };
    let _ = writeln!(out, "> Add a new todo...  {button}");
    let _ = writeln!(out);

    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {error}");
    }

    if state.todos.is_empty() {
        let message = if state.loading {
            LOADING_MESSAGE
        } else {
            EMPTY_MESSAGE
        };
        let _ = writeln!(out, "{message}");
    } else {
        let width = state
            .todos
            .iter()
            .map(|t| t.id.to_string().len())
            .max()
            .unwrap_or(1);
        for todo in &state.todos {
            let check = if todo.completed { 'x' } else { ' ' };
            let _ = writeln!(out, "[{check}] {:>width$}  {}  [Delete]", todo.id, todo.text);
        }
    }
    out
}
