//! Runtime for executing conversations
//!
//! Every conversation gets its own task and event channel the first time it
//! is seen. Events for one conversation are processed strictly in order;
//! different conversations run concurrently and share nothing but the
//! catalog store.

mod executor;
pub mod traits;


pub use executor::ConversationRuntime;
pub use traits::*;

use crate::format::OutboundMessage;
use crate::router::{route, InboundEvent};
use crate::state_machine::{Event, Flow};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, RwLock};

/// Type alias for production runtime manager backed by `SQLite`
pub type ProductionRuntimeManager = RuntimeManager<DatabaseStorage>;

/// An event on its way into a conversation, with a slot for the replies
#[derive(Debug)]
pub struct Dispatch {
    pub event: Event,
    pub reply_tx: oneshot::Sender<DispatchOutcome>,
}

/// What handling one event produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub messages: Vec<OutboundMessage>,
    /// Flow of the conversation after the event was handled
    pub flow: Flow,
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Conversation {0} is no longer running")]
    ConversationStopped(String),
}

/// Manager for all conversation runtimes
pub struct RuntimeManager<S>
where
    S: CatalogStore + Clone + 'static,
{
    store: S,
    runtimes: RwLock<HashMap<String, ConversationHandle>>,
}

/// Handle to interact with a running conversation
#[derive(Clone)]
pub struct ConversationHandle {
    pub event_tx: mpsc::Sender<Dispatch>,
}

impl<S> RuntimeManager<S>
where
    S: CatalogStore + Clone + 'static,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            runtimes: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create a runtime for a conversation
    pub async fn get_or_create(&self, conversation_id: &str) -> ConversationHandle {
        // Check if already running
        {
            let runtimes = self.runtimes.read().await;
            if let Some(handle) = runtimes.get(conversation_id) {
                return handle.clone();
            }
        }

        // Two first events for the same conversation can race here; the
        // entry API makes sure only one task is started.
        let mut runtimes = self.runtimes.write().await;
        runtimes
            .entry(conversation_id.to_string())
            .or_insert_with(|| self.spawn_runtime(conversation_id))
            .clone()
    }

    fn spawn_runtime(&self, conversation_id: &str) -> ConversationHandle {
        let (event_tx, event_rx) = mpsc::channel(32);
        let runtime = ConversationRuntime::new(conversation_id, self.store.clone(), event_rx);

        tokio::spawn(runtime.run());
        tracing::info!(conv_id = %conversation_id, "Conversation session started");

        ConversationHandle { event_tx }
    }

    /// Send an event to a conversation and wait until it has been handled
    pub async fn dispatch(
        &self,
        conversation_id: &str,
        event: Event,
    ) -> Result<DispatchOutcome, RuntimeError> {
        let handle = self.get_or_create(conversation_id).await;
        let (reply_tx, reply_rx) = oneshot::channel();

        let sent = handle.event_tx.send(Dispatch { event, reply_tx }).await;
        if sent.is_err() {
            self.forget(conversation_id).await;
            return Err(RuntimeError::ConversationStopped(conversation_id.to_string()));
        }

        match reply_rx.await {
            Ok(outcome) => Ok(outcome),
            Err(_) => {
                self.forget(conversation_id).await;
                Err(RuntimeError::ConversationStopped(conversation_id.to_string()))
            }
        }
    }

    /// Route a transport event and return the messages to send back.
    ///
    /// Events that match no handler produce no messages.
    pub async fn handle_inbound(
        &self,
        inbound: &InboundEvent,
    ) -> Result<Vec<OutboundMessage>, RuntimeError> {
        let conversation_id = inbound.conversation_id();

        let Some(event) = route(inbound) else {
            tracing::debug!(conv_id = %conversation_id, kind = inbound.kind(), "Unroutable event dropped");
            return Ok(Vec::new());
        };

        tracing::debug!(conv_id = %conversation_id, event = event.kind(), "Dispatching event");
        let outcome = self.dispatch(conversation_id, event).await?;
        Ok(outcome.messages)
    }

    /// Drop the handle of a conversation whose task has gone away. The next
    /// event starts a fresh session.
    async fn forget(&self, conversation_id: &str) {
        tracing::warn!(conv_id = %conversation_id, "Conversation runtime gone, resetting session");
        self.runtimes.write().await.remove(conversation_id);
    }

    /// Number of conversations seen so far
    #[allow(dead_code)] // Used by tests
    pub async fn session_count(&self) -> usize {
        self.runtimes.read().await.len()
    }

    /// Get the catalog store
    #[allow(dead_code)] // Used by tests
    pub fn store(&self) -> &S {
        &self.store
    }
}
