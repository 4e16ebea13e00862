//! Pure state transition function

use super::event::Command;
use super::{Effect, Event, Flow};
use crate::db::validate_item;
use crate::format::Reply;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: Flow,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: Flow) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// Nothing handles this event in the current flow. Dropped without a reply.
    #[error("No handler for {event} while {flow}")]
    RoutingMismatch {
        flow: &'static str,
        event: &'static str,
    },
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same flow and event it always produces the same result, with
/// no I/O. Commands are accepted in every flow; text and selections only in
/// the flows that wait for them.
pub fn transition(state: &Flow, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Commands
        // ============================================================
        (_, Event::Command { command: Command::Start, sender }) => {
            Ok(TransitionResult::new(state.clone())
                .with_effect(Effect::reply(Reply::Welcome { sender })))
        }

        (_, Event::Command { command: Command::Help, .. }) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::reply(Reply::Help)))
        }

        // Starting a new add flow abandons whatever was in progress
        (_, Event::Command { command: Command::AddItem, .. }) => {
            Ok(TransitionResult::new(Flow::AddingName).with_effect(Effect::reply(Reply::AskName)))
        }

        (_, Event::Command { command: Command::ListItems, .. }) => {
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::ListItems))
        }

        // Whether we end up choosing depends on the catalog contents, which
        // arrive as DeletionTargetsLoaded
        (_, Event::Command { command: Command::RemoveItem, .. }) => {
            Ok(TransitionResult::new(Flow::Idle).with_effect(Effect::LoadDeletionTargets))
        }

        // ============================================================
        // Add flow
        // ============================================================
        (Flow::AddingName, Event::Text { content }) => {
            if content.trim().is_empty() {
                return Ok(TransitionResult::new(Flow::AddingName)
                    .with_effect(Effect::reply(Reply::NameRequired)));
            }
            Ok(TransitionResult::new(Flow::AddingPrice { name: content })
                .with_effect(Effect::reply(Reply::AskPrice)))
        }

        (Flow::AddingPrice { name }, Event::Text { content }) => match parse_price(&content) {
            Some(price) if validate_item(name, price).is_ok() => {
                Ok(TransitionResult::new(Flow::Idle).with_effect(Effect::CreateItem {
                    name: name.clone(),
                    price,
                }))
            }
            _ => Ok(TransitionResult::new(state.clone())
                .with_effect(Effect::reply(Reply::InvalidPrice))),
        },

        // ============================================================
        // Delete flow
        // ============================================================
        (Flow::Idle, Event::DeletionTargetsLoaded { items }) => {
            if items.is_empty() {
                Ok(TransitionResult::new(Flow::Idle)
                    .with_effect(Effect::reply(Reply::NothingToRemove)))
            } else {
                Ok(TransitionResult::new(Flow::ChoosingDeletionTarget)
                    .with_effect(Effect::reply(Reply::ChooseDeletionTarget { items })))
            }
        }

        (Flow::ChoosingDeletionTarget, Event::Selection { item_id }) => {
            Ok(TransitionResult::new(Flow::Idle).with_effect(Effect::DeleteItem { id: item_id }))
        }

        // ============================================================
        // Store outcomes
        // ============================================================
        (_, Event::ItemsListed { items }) => Ok(TransitionResult::new(state.clone())
            .with_effect(Effect::reply(Reply::Catalog { items }))),

        (_, Event::ItemCreated { name, price, .. }) => Ok(TransitionResult::new(state.clone())
            .with_effect(Effect::reply(Reply::ItemAdded { name, price }))),

        (_, Event::ItemDeleted { id }) => Ok(TransitionResult::new(state.clone())
            .with_effect(Effect::reply(Reply::ItemRemoved { id }))),

        // Storage trouble aborts any flow so the conversation can't get stuck
        (_, Event::StoreFailed { .. }) => Ok(TransitionResult::new(Flow::Idle)
            .with_effect(Effect::reply(Reply::StorageFailure))),

        // ============================================================
        // Everything else
        // ============================================================
        (_, event @ (Event::Text { .. } | Event::Selection { .. })) => {
            Err(TransitionError::RoutingMismatch {
                flow: state.name(),
                event: event.kind(),
            })
        }

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "{} while {}",
            event.kind(),
            state.name()
        ))),
    }
}

/// Parse a price reply: ASCII digits only, surrounding whitespace allowed
pub fn parse_price(text: &str) -> Option<i64> {
    let digits = text.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
