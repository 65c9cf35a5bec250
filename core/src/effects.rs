//! Effect handlers: one async function per remote operation.
//!
//! Each handler waits out the configured latency, performs exactly one
//! request and parses the reply. There are no retries; the first failure is
//! returned to the caller.

use std::sync::Arc;
use std::time::Duration;

use crate::client::TodoClient;
use crate::config::Config;
use crate::error::NetworkError;
use crate::http::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::types::{NewTodo, Todo, TodoId, TodoPatch};

/// Simulated latency applied before every request unless configured otherwise.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

/// The four effect handlers, bound to a client and a transport.
#[derive(Clone)]
pub struct TodoApi {
    client: TodoClient,
    transport: Arc<dyn Transport>,
    latency: Duration,
}

impl TodoApi {
    pub fn new(client: TodoClient, transport: Arc<dyn Transport>) -> Self {
        Self {
            client,
            transport,
            latency: DEFAULT_LATENCY,
        }
    }

    /// Handlers talking to `config.base_url` over reqwest.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TodoClient::new(&config.base_url),
            Arc::new(ReqwestTransport::new()),
        )
        .with_latency(config.latency)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn list_todos(&self) -> Result<Vec<Todo>, NetworkError> {
        let response = self.round_trip(self.client.build_list_todos()).await?;
        let todos = self.client.parse_list_todos(response)?;
        tracing::debug!(count = todos.len(), "fetched todos");
        Ok(todos)
    }

    pub async fn create_todo(&self, text: &str, owner_id: u64) -> Result<Todo, NetworkError> {
        let request = self.client.build_create_todo(&NewTodo::new(text, owner_id))?;
        let todo = self.client.parse_create_todo(self.round_trip(request).await?)?;
        tracing::debug!(id = todo.id, "created todo");
        Ok(todo)
    }

    pub async fn patch_todo(&self, id: TodoId, patch: &TodoPatch) -> Result<Todo, NetworkError> {
        let request = self.client.build_update_todo(id, patch)?;
        let todo = self.client.parse_update_todo(self.round_trip(request).await?)?;
        tracing::debug!(id, "updated todo");
        Ok(todo)
    }

    pub async fn remove_todo(&self, id: TodoId) -> Result<Todo, NetworkError> {
        let request = self.client.build_delete_todo(id);
        let todo = self.client.parse_delete_todo(self.round_trip(request).await?)?;
        tracing::debug!(id, "deleted todo");
        Ok(todo)
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        tracing::trace!(method = ?request.method, path = %request.path, "sending request");
        self.transport.execute(request).await
    }
}
