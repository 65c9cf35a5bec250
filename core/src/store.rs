//! The store loop: the single owner of `AppState`.
//!
//! `Store` is a cloneable handle. `Store::spawn` starts one loop task that
//! receives intents, applies their transition, and hands each to the
//! dispatcher on a task of its own. Effects overlap freely; outcomes are
//! applied one at a time, in completion order, by the loop. Readers get
//! snapshots through a `watch` channel and never see a half-applied event.
//!
//! The loop stops once every handle is dropped and the last in-flight
//! effect has been applied.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;

use crate::dispatcher::Dispatcher;
use crate::error::StoreError;
use crate::event::{Event, Intent, Outcome};
use crate::state::{transition, AppState};

#[derive(Clone)]
pub struct Store {
    intents: mpsc::UnboundedSender<Intent>,
    state: watch::Receiver<AppState>,
    pending: Arc<watch::Sender<usize>>,
}

impl Store {
    /// Starts the loop on the current tokio runtime with an empty state.
    pub fn spawn(dispatcher: Dispatcher) -> Self {
        Self::spawn_with(dispatcher, AppState::default())
    }

    pub fn spawn_with(dispatcher: Dispatcher, initial: AppState) -> Self {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(initial);
        let pending = Arc::new(watch::Sender::new(0));

        tokio::spawn(run_loop(
            intent_rx,
            dispatcher,
            state_tx,
            Arc::clone(&pending),
        ));

        Self {
            intents: intent_tx,
            state: state_rx,
            pending,
        }
    }

    /// Queues an intent. Intents are never dropped or coalesced.
    pub fn dispatch(&self, intent: Intent) -> Result<(), StoreError> {
        self.pending.send_modify(|n| *n += 1);
        if self.intents.send(intent).is_err() {
            self.pending.send_modify(|n| *n = n.saturating_sub(1));
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified after every applied event.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.clone()
    }

    /// Number of dispatched intents whose outcome has not been applied yet.
    pub fn in_flight(&self) -> usize {
        *self.pending.borrow()
    }

    /// Waits until every dispatched intent has had its outcome applied and
    /// returns the resulting state.
    pub async fn settle(&self) -> AppState {
        let mut pending = self.pending.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close.
        let _ = pending.wait_for(|n| *n == 0).await;
        self.snapshot()
    }
}

async fn run_loop(
    mut intents: mpsc::UnboundedReceiver<Intent>,
    dispatcher: Dispatcher,
    state: watch::Sender<AppState>,
    pending: Arc<watch::Sender<usize>>,
) {
    let mut effects: JoinSet<Outcome> = JoinSet::new();
    let mut accepting = true;
    tracing::debug!("store loop started");

    loop {
        tokio::select! {
            received = intents.recv(), if accepting => match received {
                Some(intent) => {
                    apply(&state, Event::Intent(intent.clone()));
                    let dispatcher = dispatcher.clone();
                    effects.spawn(async move { dispatcher.execute(intent).await });
                }
                None => accepting = false,
            },
            Some(joined) = effects.join_next(), if !effects.is_empty() => {
                match joined {
                    Ok(outcome) => apply(&state, Event::Outcome(outcome)),
                    Err(e) => tracing::error!(error = %e, "effect task lost"),
                }
                pending.send_modify(|n| *n = n.saturating_sub(1));
            }
            else => break,
        }
    }

    tracing::debug!("store loop stopped");
}

fn apply(state: &watch::Sender<AppState>, event: Event) {
    let next = transition(&state.borrow(), &event);
    tracing::trace!(?event, loading = next.loading, todos = next.todos.len(), "applied event");
    state.send_replace(next);
}
