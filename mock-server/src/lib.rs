//! In-memory stand-in for the remote todo service.
//!
//! # Design
//! Speaks the same wire contract as the public dummy todo API: integer ids
//! assigned by the server, `todo` for the text and `userId` for the owner.
//! Unlike the public API, writes are actually persisted in memory so a
//! client can observe its own creates, updates and deletes.
//!
//! The table is a `BTreeMap` keyed by id, so listing order is creation
//! order (ids are handed out sequentially).

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub todo: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub todo: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub todo: Option<String>,
    pub completed: Option<bool>,
}

/// Envelope returned by `GET /todos`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoPage {
    pub todos: Vec<Todo>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

/// Body returned by `DELETE /todos/{id}`: the removed todo, flagged.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedTodo {
    #[serde(flatten)]
    pub todo: Todo,
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
}

#[derive(Debug, Default)]
pub struct TodoTable {
    todos: BTreeMap<u64, Todo>,
    next_id: u64,
}

impl TodoTable {
    fn seeded(todos: Vec<Todo>) -> Self {
        let next_id = todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            todos: todos.into_iter().map(|t| (t.id, t)).collect(),
            next_id,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }
}

pub type Db = Arc<RwLock<TodoTable>>;

/// Router over an empty table.
pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router over a table pre-populated with `todos`. New ids continue after
/// the largest seeded id.
pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(TodoTable::seeded(todos)));
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/add", post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(db)
}

/// A handful of todos for running the server by hand.
pub fn sample_todos() -> Vec<Todo> {
    [
        (1, "Do something nice for someone you care about", false, 152),
        (2, "Memorize a poem", true, 13),
        (3, "Watch a classic movie", true, 68),
    ]
    .into_iter()
    .map(|(id, text, completed, user_id)| Todo {
        id,
        todo: text.to_string(),
        completed,
        user_id,
    })
    .collect()
}

pub async fn run(listener: TcpListener, todos: Vec<Todo>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(todos)).await
}

async fn list_todos(State(db): State<Db>) -> Json<TodoPage> {
    let table = db.read().await;
    let todos: Vec<Todo> = table.todos.values().cloned().collect();
    let total = todos.len();
    Json(TodoPage {
        todos,
        total,
        skip: 0,
        limit: total,
    })
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut table = db.write().await;
    let todo = Todo {
        id: table.allocate_id(),
        todo: input.todo,
        completed: input.completed,
        user_id: input.user_id,
    };
    table.todos.insert(todo.id, todo.clone());
    tracing::debug!(id = todo.id, "created todo");
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, StatusCode> {
    let table = db.read().await;
    table.todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut table = db.write().await;
    let todo = table.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(text) = input.todo {
        todo.todo = text;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    tracing::debug!(id, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<DeletedTodo>, StatusCode> {
    let mut table = db.write().await;
    let todo = table.todos.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::debug!(id, "deleted todo");
    Ok(Json(DeletedTodo {
        todo,
        is_deleted: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_uses_wire_field_names() {
        let todo = Todo {
            id: 7,
            todo: "Test".to_string(),
            completed: false,
            user_id: 3,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["todo"], "Test");
        assert_eq!(json["completed"], false);
        assert_eq!(json["userId"], 3);
    }

    #[test]
    fn deleted_todo_flattens_the_removed_record() {
        let deleted = DeletedTodo {
            todo: Todo {
                id: 4,
                todo: "Gone".to_string(),
                completed: true,
                user_id: 1,
            },
            is_deleted: true,
        };
        let json = serde_json::to_value(&deleted).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["todo"], "Gone");
        assert_eq!(json["isDeleted"], true);
    }

    #[test]
    fn create_todo_defaults_completed_to_false() {
        let input: CreateTodo =
            serde_json::from_str(r#"{"todo":"No completed field","userId":1}"#).unwrap();
        assert_eq!(input.todo, "No completed field");
        assert!(!input.completed);
        assert_eq!(input.user_id, 1);
    }

    #[test]
    fn create_todo_rejects_missing_owner() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"todo":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_todo_all_fields_optional() {
        let input: UpdateTodo = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.todo.is_none());
        assert!(input.completed.is_none());
    }

    #[test]
    fn seeded_table_continues_after_largest_id() {
        let mut table = TodoTable::seeded(sample_todos());
        assert_eq!(table.allocate_id(), 4);
        assert_eq!(table.allocate_id(), 5);
    }

    #[test]
    fn empty_table_starts_at_one() {
        let mut table = TodoTable::seeded(Vec::new());
        assert_eq!(table.allocate_id(), 1);
    }
}
