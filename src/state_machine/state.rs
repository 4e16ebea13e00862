//! Conversation flow types

/// Where a conversation is in a multi-step procedure.
///
/// Draft data lives inside the variant that needs it, so a flow can never
/// disagree with its draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Flow {
    /// No procedure running; the rest state
    #[default]
    Idle,

    /// `add_item` received, waiting for the item name
    AddingName,

    /// Name captured, waiting for a price
    AddingPrice { name: String },

    /// Deletion options were shown, waiting for a selection
    ChoosingDeletionTarget,
}

impl Flow {
    /// Stable name used in logs and API responses
    pub fn name(&self) -> &'static str {
        match self {
            Flow::Idle => "idle",
            Flow::AddingName => "adding_name",
            Flow::AddingPrice { .. } => "adding_price",
            Flow::ChoosingDeletionTarget => "choosing_deletion_target",
        }
    }
}
