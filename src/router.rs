//! Command routing
//!
//! Turns transport-level inbound events into state machine [`Event`]s.
//! Precedence is: known commands, then selection payloads of the
//! `remove_item_<id>` shape, then plain text. Whether a selection or a text
//! reply is actually accepted depends on the conversation's current flow and
//! is decided by the state machine.

use crate::db::ItemId;
use crate::state_machine::event::Command;
use crate::state_machine::Event;
use serde::Deserialize;

/// Prefix of the selection payload attached to deletion options
pub const REMOVE_ITEM_PREFIX: &str = "remove_item_";

/// Event as delivered by the transport adapter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    Command {
        name: String,
        conversation_id: String,
        #[serde(default)]
        sender_display_name: Option<String>,
    },
    Text {
        content: String,
        conversation_id: String,
        /// Only used when the text turns out to be a slash command
        #[serde(default)]
        sender_display_name: Option<String>,
    },
    Selection {
        payload: String,
        conversation_id: String,
    },
}

impl InboundEvent {
    pub fn conversation_id(&self) -> &str {
        match self {
            InboundEvent::Command {
                conversation_id, ..
            }
            | InboundEvent::Text {
                conversation_id, ..
            }
            | InboundEvent::Selection {
                conversation_id, ..
            } => conversation_id,
        }
    }

    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Command { .. } => "command",
            InboundEvent::Text { .. } => "text",
            InboundEvent::Selection { .. } => "selection",
        }
    }
}

/// Map an inbound event to a state machine event.
///
/// Returns `None` when the event cannot match any handler regardless of
/// session state: unknown command names and malformed selection payloads.
pub fn route(inbound: &InboundEvent) -> Option<Event> {
    match inbound {
        InboundEvent::Command {
            name,
            sender_display_name,
            ..
        } => Command::from_name(name).map(|command| Event::Command {
            command,
            sender: sender_display_name.clone(),
        }),
        InboundEvent::Selection { payload, .. } => {
            parse_removal_payload(payload).map(|item_id| Event::Selection { item_id })
        }
        // Chat clients send commands as text ("/add_item", "/start@SomeBot").
        // Unknown slash words fall through as ordinary text.
        InboundEvent::Text {
            content,
            sender_display_name,
            ..
        } => match parse_command_text(content) {
            Some(command) => Some(Event::Command {
                command,
                sender: sender_display_name.clone(),
            }),
            None => Some(Event::Text {
                content: content.clone(),
            }),
        },
    }
}

/// Recognize a command typed as a chat message
fn parse_command_text(text: &str) -> Option<Command> {
    let word = text.split_whitespace().next()?;
    let name = word.strip_prefix('/')?;
    // Group chats address commands to a specific bot
    let name = name.split_once('@').map_or(name, |(name, _bot)| name);
    Command::from_name(name)
}

/// Build the selection payload for deleting `id`
pub fn removal_payload(id: ItemId) -> String {
    format!("{REMOVE_ITEM_PREFIX}{id}")
}

/// Parse a `remove_item_<id>` payload.
///
/// The suffix must be a plain decimal number that fits an item id; signs,
/// whitespace and trailing characters are rejected.
pub fn parse_removal_payload(payload: &str) -> Option<ItemId> {
    let digits = payload.strip_prefix(REMOVE_ITEM_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
