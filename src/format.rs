//! Response formatting
//!
//! The state machine decides *what* to say as a [`Reply`]; this module
//! decides how it reads.

use crate::db::{Item, ItemId};
use crate::router::removal_payload;
use serde::Serialize;

const COMMAND_SUMMARY: &str = "Available commands:
/start - show the welcome message
/help - show this list
/add_item - add a new item
/list_items - show all items
/remove_item - remove an item";

/// Something the bot wants to tell the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Welcome { sender: Option<String> },
    Help,
    AskName,
    NameRequired,
    AskPrice,
    InvalidPrice,
    ItemAdded { name: String, price: i64 },
    Catalog { items: Vec<Item> },
    NothingToRemove,
    ChooseDeletionTarget { items: Vec<Item> },
    ItemRemoved { id: ItemId },
    StorageFailure,
}

/// A message for the transport adapter to deliver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    Text {
        text: String,
    },
    /// Message with a list of tappable options
    Options {
        text: String,
        options: Vec<SelectOption>,
    },
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        OutboundMessage::Text { text: text.into() }
    }

    /// The message body, regardless of shape
    pub fn body(&self) -> &str {
        match self {
            OutboundMessage::Text { text } | OutboundMessage::Options { text, .. } => text,
        }
    }
}

/// One selectable option; `payload` comes back verbatim in a selection event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub payload: String,
}

/// Render a reply into a deliverable message
pub fn render(reply: &Reply) -> OutboundMessage {
    match reply {
        Reply::Welcome { sender: Some(name) } => OutboundMessage::text(format!(
            "Welcome, {name}! Glad to see you.\n{COMMAND_SUMMARY}"
        )),
        Reply::Welcome { sender: None } => {
            OutboundMessage::text(format!("Welcome! Glad to see you.\n{COMMAND_SUMMARY}"))
        }
        Reply::Help => OutboundMessage::text(COMMAND_SUMMARY),
        Reply::AskName => OutboundMessage::text("Enter the full item name:"),
        Reply::NameRequired => {
            OutboundMessage::text("The item name cannot be empty. Enter the full item name:")
        }
        Reply::AskPrice => OutboundMessage::text("Enter the item price:"),
        Reply::InvalidPrice => {
            OutboundMessage::text("Please enter the price as a whole number, for example 150.")
        }
        Reply::ItemAdded { name, price } => OutboundMessage::text(format!(
            "Item \"{name}\" (price: {price}) added successfully!"
        )),
        Reply::Catalog { items } => OutboundMessage::text(catalog_listing(items)),
        Reply::NothingToRemove => OutboundMessage::text("There are no items to remove."),
        Reply::ChooseDeletionTarget { items } => OutboundMessage::Options {
            text: "Choose an item to remove:".to_string(),
            options: items.iter().map(deletion_option).collect(),
        },
        Reply::ItemRemoved { id } => OutboundMessage::text(format!("Item with ID {id} removed.")),
        Reply::StorageFailure => OutboundMessage::text(
            "Something went wrong while accessing the catalog. Please try again.",
        ),
    }
}

/// Numbered listing, one `"{id}. {name} - {price}"` line per item
pub fn catalog_listing(items: &[Item]) -> String {
    if items.is_empty() {
        return "There are no items in the catalog.".to_string();
    }

    let lines: Vec<String> = items
        .iter()
        .map(|item| format!("{}. {} - {}", item.id, item.name, item.price))
        .collect();
    format!("Items:\n{}", lines.join("\n"))
}

fn deletion_option(item: &Item) -> SelectOption {
    SelectOption {
        label: format!("{}. {} ({})", item.id, item.name, item.price),
        payload: removal_payload(item.id),
    }
}
