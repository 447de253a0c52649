//! Card conversation scripts.
//!
//! A card owner authors a tree of prompts. Each node shows a title and a
//! message, and offers its children as choices. Children marked with
//! [`ConversationAction::Message`] start a reply instead of opening.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConversationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationAction {
    Message,
}

/// One node of a conversation tree. Every field may be missing from the
/// stored document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationItem {
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ConversationAction>,
    pub items: Vec<ConversationItem>,
}

impl ConversationItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_action(mut self, action: ConversationAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_items(mut self, items: Vec<ConversationItem>) -> Self {
        self.items = items;
        self
    }

    /// A node without children ends the script with a plain "send message".
    pub fn is_leaf(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether choosing this node starts a reply rather than opening it.
    pub fn is_message_action(&self) -> bool {
        self.action == Some(ConversationAction::Message)
    }

    /// Total node count including this one.
    pub fn node_count(&self) -> usize {
        1 + self.items.iter().map(ConversationItem::node_count).sum::<usize>()
    }

    /// Parse a stored conversation document. A missing or blank payload is
    /// the empty root `{}`.
    pub fn parse(payload: Option<&str>) -> Result<Self, ConversationError> {
        match payload.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(raw) => Ok(parse_unbounded(raw)?),
        }
    }

    /// Like [`ConversationItem::parse`], but a malformed document yields the
    /// empty root so a card can always be replied to.
    pub fn parse_or_default(payload: Option<&str>) -> Self {
        Self::parse(payload).unwrap_or_else(|e| {
            warn!(error = %e, "Unreadable card conversation, using empty root");
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// Scripts are authored by card owners and may nest arbitrarily deep, so the
// parser's recursion limit is lifted and the stack grows on demand instead.
fn parse_unbounded(raw: &str) -> Result<ConversationItem, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(raw);
    de.disable_recursion_limit();
    let item = ConversationItem::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(item)
}
