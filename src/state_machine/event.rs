//! Events that can occur in a conversation

use crate::db::{Item, ItemId};

/// Chat commands understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    AddItem,
    ListItems,
    RemoveItem,
}

impl Command {
    /// Look up a command by its chat name (without the leading slash)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "add_item" => Some(Command::AddItem),
            "list_items" => Some(Command::ListItems),
            "remove_item" => Some(Command::RemoveItem),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::AddItem => "add_item",
            Command::ListItems => "list_items",
            Command::RemoveItem => "remove_item",
        }
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    Command {
        command: Command,
        /// Display name of the sender, when the transport knows it
        sender: Option<String>,
    },
    Text {
        content: String,
    },
    Selection {
        item_id: ItemId,
    },

    // Store events
    ItemsListed {
        items: Vec<Item>,
    },
    DeletionTargetsLoaded {
        items: Vec<Item>,
    },
    ItemCreated {
        id: ItemId,
        name: String,
        price: i64,
    },
    ItemDeleted {
        id: ItemId,
    },
    StoreFailed {
        message: String,
    },
}

impl Event {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Command { command, .. } => command.name(),
            Event::Text { .. } => "text",
            Event::Selection { .. } => "selection",
            Event::ItemsListed { .. } => "items_listed",
            Event::DeletionTargetsLoaded { .. } => "deletion_targets_loaded",
            Event::ItemCreated { .. } => "item_created",
            Event::ItemDeleted { .. } => "item_deleted",
            Event::StoreFailed { .. } => "store_failed",
        }
    }
}
