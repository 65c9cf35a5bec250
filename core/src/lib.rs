//! Client-side state management for a remote todo list.
//!
//! # Overview
//! A view emits intents (load, add, update, delete). The store applies each
//! intent to its state, the dispatcher runs the matching effect handler
//! against the remote service, and the resulting success or failure outcome
//! is applied back to the state. The view re-renders from snapshots.
//!
//! # Design
//! - `TodoClient` builds `HttpRequest`s and parses `HttpResponse`s without
//!   I/O; a `Transport` (reqwest in production) does the round-trip.
//! - `transition` is a pure function; `Store` is the only thing that calls
//!   it, from a single loop task, so state is never written concurrently.
//! - Effects run one task per intent with no queuing, retries or
//!   cancellation. Outcomes are applied in completion order.

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod effects;
pub mod error;
pub mod event;
pub mod http;
pub mod state;
pub mod store;
pub mod types;
pub mod view;

#[cfg(test)]
mod testing;

pub use client::TodoClient;
pub use config::Config;
pub use dispatcher::Dispatcher;
pub use effects::TodoApi;
pub use error::{ConfigError, NetworkError, Operation, StoreError};
pub use event::{Event, Intent, IntentKind, Outcome};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use state::{transition, AppState};
pub use store::Store;
pub use types::{NewTodo, Todo, TodoId, TodoList, TodoPatch};
pub use view::{intent_for, render, UserInput};
