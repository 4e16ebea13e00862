//! Conversation runtime executor

use super::traits::CatalogStore;
use super::{Dispatch, DispatchOutcome};

use crate::format::{render, OutboundMessage};
use crate::state_machine::{transition, Effect, Event, Flow, TransitionError};
use std::collections::VecDeque;
use tokio::sync::mpsc;

/// Runs one conversation's flow, one event at a time.
///
/// Each dispatched event, including every store call it causes, is finished
/// before the next one is received, so a conversation never has two handlers
/// in flight.
pub struct ConversationRuntime<S>
where
    S: CatalogStore + 'static,
{
    conversation_id: String,
    state: Flow,
    store: S,
    event_rx: mpsc::Receiver<Dispatch>,
}

impl<S> ConversationRuntime<S>
where
    S: CatalogStore + 'static,
{
    pub fn new(
        conversation_id: impl Into<String>,
        store: S,
        event_rx: mpsc::Receiver<Dispatch>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            state: Flow::Idle,
            store,
            event_rx,
        }
    }

    pub async fn run(mut self) {
        tracing::debug!(conv_id = %self.conversation_id, "Starting conversation runtime");

        while let Some(Dispatch { event, reply_tx }) = self.event_rx.recv().await {
            let messages = self.process_event(event).await;
            let outcome = DispatchOutcome {
                messages,
                flow: self.state.clone(),
            };
            if reply_tx.send(outcome).is_err() {
                tracing::debug!(conv_id = %self.conversation_id, "Dispatcher went away before reply");
            }
        }

        tracing::debug!(conv_id = %self.conversation_id, "Conversation runtime stopped");
    }

    /// Apply an event and everything it sets off, returning the replies
    async fn process_event(&mut self, event: Event) -> Vec<OutboundMessage> {
        let mut messages = Vec::new();
        // Store effects produce follow-up events; handle them in order
        let mut events_to_process = VecDeque::from([event]);

        while let Some(current_event) = events_to_process.pop_front() {
            let kind = current_event.kind();

            // Pure state transition
            let result = match transition(&self.state, current_event) {
                Ok(r) => r,
                Err(e @ TransitionError::RoutingMismatch { .. }) => {
                    tracing::debug!(conv_id = %self.conversation_id, reason = %e, "Event dropped");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(conv_id = %self.conversation_id, error = %e, "Rejected transition");
                    continue;
                }
            };

            if result.new_state != self.state {
                tracing::debug!(
                    conv_id = %self.conversation_id,
                    event = kind,
                    from = self.state.name(),
                    to = result.new_state.name(),
                    "Flow changed"
                );
            }
            self.state = result.new_state;

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(effect, &mut messages).await {
                    events_to_process.push_back(generated_event);
                }
            }
        }

        messages
    }

    /// Execute an effect and optionally return a generated event
    ///
    /// Replies are rendered into `messages`; store calls report their outcome
    /// as an event.
    async fn execute_effect(
        &self,
        effect: Effect,
        messages: &mut Vec<OutboundMessage>,
    ) -> Option<Event> {
        let outcome = match effect {
            Effect::Reply(reply) => {
                let message = render(&reply);
                tracing::debug!(conv_id = %self.conversation_id, reply = %message.body(), "Reply");
                messages.push(message);
                return None;
            }
            Effect::CreateItem { name, price } => {
                let created = self.store.create_item(&name, price).await;
                created.map(|id| Event::ItemCreated { id, name, price })
            }
            Effect::ListItems => self
                .store
                .list_items()
                .await
                .map(|items| Event::ItemsListed { items }),
            Effect::LoadDeletionTargets => self
                .store
                .list_items()
                .await
                .map(|items| Event::DeletionTargetsLoaded { items }),
            Effect::DeleteItem { id } => self
                .store
                .delete_item(id)
                .await
                .map(|()| Event::ItemDeleted { id }),
        };

        Some(outcome.unwrap_or_else(|e| {
            if e.is_validation() {
                tracing::warn!(conv_id = %self.conversation_id, error = %e, "Catalog store rejected input");
            } else {
                tracing::error!(conv_id = %self.conversation_id, error = %e, "Catalog store failed");
            }
            Event::StoreFailed {
                message: e.to_string(),
            }
        }))
    }
}
