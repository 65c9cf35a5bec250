//! Events flowing through the store.
//!
//! The view emits `Intent`s; the dispatcher answers each with exactly one
//! `Outcome`. Both feed the transition table as an `Event`.

use crate::types::{Todo, TodoId, TodoPatch};

/// A request to perform one remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Load,
    Add {
        text: String,
        owner_id: u64,
    },
    Update {
        id: TodoId,
        completed: Option<bool>,
        text: Option<String>,
    },
    Delete {
        id: TodoId,
    },
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::Load => IntentKind::Load,
            Intent::Add { .. } => IntentKind::Add,
            Intent::Update { .. } => IntentKind::Update,
            Intent::Delete { .. } => IntentKind::Delete,
        }
    }

    /// The PUT body carried by an update intent.
    pub fn patch(&self) -> Option<TodoPatch> {
        match self {
            Intent::Update {
                completed, text, ..
            } => Some(TodoPatch {
                completed: *completed,
                text: text.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Load,
    Add,
    Update,
    Delete,
}

/// The result of running an intent's effect handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Loaded(Vec<Todo>),
    LoadFailed(String),
    Added(Todo),
    AddFailed(String),
    Updated(Todo),
    UpdateFailed(String),
    Deleted(TodoId),
    DeleteFailed(String),
}

impl Outcome {
    pub fn failure(kind: IntentKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            IntentKind::Load => Outcome::LoadFailed(message),
            IntentKind::Add => Outcome::AddFailed(message),
            IntentKind::Update => Outcome::UpdateFailed(message),
            IntentKind::Delete => Outcome::DeleteFailed(message),
        }
    }

    pub fn kind(&self) -> IntentKind {
        match self {
            Outcome::Loaded(_) | Outcome::LoadFailed(_) => IntentKind::Load,
            Outcome::Added(_) | Outcome::AddFailed(_) => IntentKind::Add,
            Outcome::Updated(_) | Outcome::UpdateFailed(_) => IntentKind::Update,
            Outcome::Deleted(_) | Outcome::DeleteFailed(_) => IntentKind::Delete,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::LoadFailed(message)
            | Outcome::AddFailed(message)
            | Outcome::UpdateFailed(message)
            | Outcome::DeleteFailed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Intent(Intent),
    Outcome(Outcome),
}

impl From<Intent> for Event {
    fn from(intent: Intent) -> Self {
        Event::Intent(intent)
    }
}

impl From<Outcome> for Event {
    fn from(outcome: Outcome) -> Self {
        Event::Outcome(outcome)
    }
}
