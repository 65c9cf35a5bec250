//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The round-trip in between is someone else's job (see `Transport`), which
//! keeps this half deterministic.

use serde::de::DeserializeOwned;

use crate::error::{NetworkError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTodo, Todo, TodoId, TodoList, TodoPatch};

/// Builds requests for and parses responses from the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, NetworkError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos/add", self.base_url),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_update_todo(&self, id: TodoId, patch: &TodoPatch) -> Result<HttpRequest, NetworkError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/todos/{id}", self.base_url),
            headers: json_headers(),
            body: Some(to_json(patch)?),
        })
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/todos/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, NetworkError> {
        check_status(&response, Operation::List)?;
        let list: TodoList = from_json(&response.body)?;
        Ok(list.todos)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, NetworkError> {
        check_status(&response, Operation::Create)?;
        from_json(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, NetworkError> {
        check_status(&response, Operation::Update)?;
        from_json(&response.body)
    }

    /// The service echoes the removed record back.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Todo, NetworkError> {
        check_status(&response, Operation::Delete)?;
        from_json(&response.body)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, NetworkError> {
    serde_json::to_string(value).map_err(|e| NetworkError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, NetworkError> {
    serde_json::from_str(body).map_err(|e| NetworkError::Deserialization(e.to_string()))
}

/// Any non-2xx status fails the operation.
fn check_status(response: &HttpResponse, operation: Operation) -> Result<(), NetworkError> {
    if response.is_success() {
        return Ok(());
    }
    Err(NetworkError::Status {
        operation,
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("https://dummyjson.com")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "https://dummyjson.com/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_todo_posts_to_add() {
        let req = client().build_create_todo(&NewTodo::new("Buy milk", 1)).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "https://dummyjson.com/todos/add");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"todo": "Buy milk", "completed": false, "userId": 1})
        );
    }

    #[test]
    fn build_update_todo_omits_absent_fields() {
        let patch = TodoPatch {
            completed: Some(true),
            text: None,
        };
        let req = client().build_update_todo(7, &patch).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "https://dummyjson.com/todos/7");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"completed": true}));
    }

    #[test]
    fn build_update_todo_sends_text_as_todo() {
        let patch = TodoPatch {
            completed: None,
            text: Some("Renamed".to_string()),
        };
        let req = client().build_update_todo(7, &patch).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"todo": "Renamed"}));
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "https://dummyjson.com/todos/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_todos_unwraps_envelope() {
        let body = r#"{"todos":[{"id":1,"todo":"Test","completed":false,"userId":26}],"total":254,"skip":0,"limit":30}"#;
        let todos = client().parse_list_todos(response(200, body)).unwrap();
        assert_eq!(
            todos,
            vec![Todo {
                id: 1,
                text: "Test".to_string(),
                completed: false,
                owner_id: 26,
            }]
        );
    }

    #[test]
    fn parse_list_todos_server_error() {
        let err = client()
            .parse_list_todos(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, NetworkError::Status { status: 500, .. }));
        assert_eq!(err.to_string(), "Failed to fetch todos");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(response(200, "not json")).unwrap_err();
        assert!(matches!(err, NetworkError::Deserialization(_)));
    }

    #[test]
    fn parse_create_todo_accepts_any_2xx() {
        let body = r#"{"id":101,"todo":"buy milk","completed":false,"userId":1}"#;
        let created = client().parse_create_todo(response(201, body)).unwrap();
        assert_eq!(created.id, 101);
        let ok = client().parse_create_todo(response(200, body)).unwrap();
        assert_eq!(ok, created);
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client().parse_create_todo(response(400, "bad")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to create todo");
    }

    #[test]
    fn parse_update_todo_not_found_is_plain_failure() {
        let err = client().parse_update_todo(response(404, "")).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::Status {
                operation: Operation::Update,
                status: 404,
                ..
            }
        ));
        assert_eq!(err.to_string(), "Failed to update todo");
    }

    #[test]
    fn parse_delete_todo_ignores_deletion_flags() {
        let body = r#"{"id":1,"todo":"Gone","completed":true,"userId":26,"isDeleted":true,"deletedOn":"2024-01-01T00:00:00.000Z"}"#;
        let removed = client().parse_delete_todo(response(200, body)).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(removed.text, "Gone");
    }

    #[test]
    fn parse_delete_todo_failure_message() {
        let err = client().parse_delete_todo(response(503, "")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete todo");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        let req = client.build_list_todos();
        assert_eq!(req.path, "http://localhost:3000/todos");
    }
}
