//! What a card's conversation looks like at the navigator's position.

use ailaai_shared::types::PersonId;
use ailaai_shared::Card;
use serde::Serialize;

use crate::navigator::{ConversationNavigator, ReplyRequest};

/// Card-level facts the conversation header and buttons depend on.
#[derive(Debug, Clone)]
pub struct ConversationContext<'a> {
    pub card_name: Option<&'a str>,
    pub card_location: Option<&'a str>,
    /// The viewer owns or co-authors the card
    pub is_mine: bool,
    /// False for read-only previews
    pub interactable: bool,
}

impl<'a> ConversationContext<'a> {
    pub fn for_card(card: &'a Card, viewer: Option<&PersonId>) -> Self {
        Self {
            card_name: card.name.as_deref(),
            card_location: card.location.as_deref(),
            is_mine: viewer.is_some_and(|p| card.is_owned_by(p)),
            interactable: true,
        }
    }
}

/// An unnamed card viewed by someone else, with working buttons.
impl Default for ConversationContext<'_> {
    fn default() -> Self {
        Self {
            card_name: None,
            card_location: None,
            is_mine: false,
            interactable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConversationOption {
    /// Opens the child at `index`.
    Descend { index: usize, title: String },
    /// Starts a reply right away.
    Reply {
        index: usize,
        title: String,
        breadcrumb: Vec<String>,
        enabled: bool,
    },
    /// Plain "send message" offered at the end of a path.
    SendMessage { breadcrumb: Vec<String>, enabled: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    pub heading: String,
    pub subheading: String,
    /// Body of the current node, absent when blank
    pub message: Option<String>,
    pub options: Vec<ConversationOption>,
    pub can_go_back: bool,
    /// Authors and categories are only shown on the first page
    pub show_authors: bool,
    pub show_categories: bool,
}

impl ConversationNavigator {
    pub fn view(&self, ctx: &ConversationContext<'_>) -> ConversationView {
        let current = self.current();
        let stack = self.stack();

        let heading = if stack.is_empty() {
            ctx.card_name.unwrap_or_default().to_string()
        } else {
            current.title.clone()
        };

        let subheading = ctx
            .card_name
            .filter(|_| stack.len() == 1)
            .or_else(|| stack.last().map(|item| item.title.as_str()))
            .or(ctx.card_location)
            .unwrap_or_default()
            .to_string();

        let message = (!current.message.trim().is_empty()).then(|| current.message.clone());

        let mut options = Vec::new();
        if ctx.interactable {
            let path = self.breadcrumb();
            for (index, child) in current.items.iter().enumerate() {
                if child.is_message_action() {
                    let mut breadcrumb = path.clone();
                    breadcrumb.push(child.title.clone());
                    options.push(ConversationOption::Reply {
                        index,
                        title: child.title.clone(),
                        breadcrumb,
                        enabled: !ctx.is_mine,
                    });
                } else {
                    options.push(ConversationOption::Descend {
                        index,
                        title: child.title.clone(),
                    });
                }
            }

            if let Some(ReplyRequest { breadcrumb }) = self.terminal_action() {
                options.push(ConversationOption::SendMessage {
                    breadcrumb,
                    enabled: !ctx.is_mine,
                });
            }
        }

        ConversationView {
            heading,
            subheading,
            message,
            options,
            can_go_back: ctx.interactable && self.can_go_back(),
            show_authors: stack.is_empty(),
            show_categories: stack.is_empty(),
        }
    }
}
