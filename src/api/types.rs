//! API request and response types

use crate::format::OutboundMessage;
use serde::Serialize;

/// Messages to deliver in reply to one inbound event
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub messages: Vec<OutboundMessage>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
