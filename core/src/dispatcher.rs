//! Maps intents to effect handlers and handler results to outcomes.
//!
//! # Design
//! `Dispatcher` holds no per-request state. `execute` runs the handler on a
//! task of its own, so any number of intents can be in flight at once and a
//! panicking handler still yields a failure outcome instead of taking the
//! caller down with it.

use std::sync::Arc;

use crate::effects::TodoApi;
use crate::error::NetworkError;
use crate::event::{Intent, Outcome};

/// Message used when a handler fails without a usable description.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<TodoApi>,
}

impl Dispatcher {
    pub fn new(api: TodoApi) -> Self {
        Self { api: Arc::new(api) }
    }

    /// Runs the handler matching `intent` exactly once and resolves to its
    /// outcome. Never fails: every error becomes a failure outcome.
    pub async fn execute(&self, intent: Intent) -> Outcome {
        let kind = intent.kind();
        let api = Arc::clone(&self.api);
        tracing::debug!(?intent, "running effect");

        let outcome = match tokio::spawn(run(api, intent)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(?kind, error = %e, "effect task did not complete");
                Outcome::failure(kind, UNKNOWN_ERROR)
            }
        };

        if let Some(message) = outcome.error() {
            tracing::warn!(?kind, error = message, "effect failed");
        }
        outcome
    }
}

async fn run(api: Arc<TodoApi>, intent: Intent) -> Outcome {
    match &intent {
        Intent::Load => match api.list_todos().await {
            Ok(todos) => Outcome::Loaded(todos),
            Err(e) => Outcome::LoadFailed(failure_message(&e)),
        },
        Intent::Add { text, owner_id } => match api.create_todo(text, *owner_id).await {
            Ok(todo) => Outcome::Added(todo),
            Err(e) => Outcome::AddFailed(failure_message(&e)),
        },
        Intent::Update { id, .. } => {
            let patch = intent.patch().unwrap_or_default();
            match api.patch_todo(*id, &patch).await {
                Ok(todo) => Outcome::Updated(todo),
                Err(e) => Outcome::UpdateFailed(failure_message(&e)),
            }
        }
        // The removed record in the response is not needed; the intent's id is.
        Intent::Delete { id } => match api.remove_todo(*id).await {
            Ok(_) => Outcome::Deleted(*id),
            Err(e) => Outcome::DeleteFailed(failure_message(&e)),
        },
    }
}

fn failure_message(error: &NetworkError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}
