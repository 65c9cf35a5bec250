//! Domain DTOs for the todo API.
//!
//! # Design
//! Field names are chosen for the domain (`text`, `owner_id`); serde renames
//! map them to the service's wire names (`todo`, `userId`). These types are
//! defined independently of the mock-server crate so integration tests catch
//! schema drift between the two.

use serde::{Deserialize, Serialize};

/// Server-assigned todo identifier.
pub type TodoId = u64;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    #[serde(rename = "todo")]
    pub text: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub owner_id: u64,
}

/// Request payload for creating a todo. New todos always start incomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodo {
    #[serde(rename = "todo")]
    pub text: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub owner_id: u64,
}

impl NewTodo {
    pub fn new(text: impl Into<String>, owner_id: u64) -> Self {
        Self {
            text: text.into(),
            completed: false,
            owner_id,
        }
    }
}

/// Partial update for an existing todo. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(rename = "todo", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Envelope of the list endpoint. Paging counters are carried but unused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub skip: usize,
    #[serde(default)]
    pub limit: usize,
}
