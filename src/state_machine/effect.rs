//! Effects produced by state transitions

use crate::db::ItemId;
use crate::format::Reply;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a message back to the conversation
    Reply(Reply),

    /// Insert an item into the catalog
    CreateItem { name: String, price: i64 },

    /// Read the catalog for a listing
    ListItems,

    /// Read the catalog to offer deletion options
    LoadDeletionTargets,

    /// Remove an item from the catalog
    DeleteItem { id: ItemId },
}

impl Effect {
    pub fn reply(reply: Reply) -> Self {
        Effect::Reply(reply)
    }
}
