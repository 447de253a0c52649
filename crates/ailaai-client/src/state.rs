//! Per-card conversation session.
//!
//! A [`ConversationSession`] ties a navigator to the card it walks, the
//! person viewing it and the sink that receives replies. It lives as long as
//! the card is on screen and is never persisted.

use ailaai_shared::types::PersonId;
use ailaai_shared::Card;
use tracing::info;

use crate::config::ClientConfig;
use crate::error::NavigationError;
use crate::events::{emit_event, ClientEvent, EventSink, StackChangedPayload};
use crate::navigator::{ConversationNavigator, ReplyRequest, Selection};
use crate::view::{ConversationContext, ConversationView};

pub struct ConversationSession<S: EventSink> {
    card: Card,
    /// Person viewing the card, `None` when signed out
    viewer: Option<PersonId>,
    navigator: ConversationNavigator,
    sink: S,
}

impl<S: EventSink> ConversationSession<S> {
    pub fn new(card: Card, viewer: Option<PersonId>, config: &ClientConfig, sink: S) -> Self {
        let navigator = ConversationNavigator::from_payload(card.conversation.as_deref())
            .with_max_depth(config.max_depth);
        Self {
            card,
            viewer,
            navigator,
            sink,
        }
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn navigator(&self) -> &ConversationNavigator {
        &self.navigator
    }

    pub fn is_mine(&self) -> bool {
        self.viewer
            .as_ref()
            .is_some_and(|viewer| self.card.is_owned_by(viewer))
    }

    /// Replace the card with a freshly fetched copy. Navigation restarts if
    /// the conversation script changed.
    pub fn update_card(&mut self, card: Card) {
        let reset = self.navigator.reset(card.conversation.as_deref());
        self.card = card;
        if reset {
            self.emit_stack();
        }
    }

    pub fn view(&self) -> ConversationView {
        self.navigator
            .view(&ConversationContext::for_card(&self.card, self.viewer.as_ref()))
    }

    /// Choose one of the options on screen.
    pub fn select(&mut self, index: usize) -> Result<(), NavigationError> {
        if self.is_mine() && self.is_reply_choice(index) {
            return Err(NavigationError::OwnCard);
        }
        match self.navigator.select_child(index)? {
            Selection::Descended => self.emit_stack(),
            Selection::Reply(request) => self.emit_reply(request),
        }
        Ok(())
    }

    pub fn back(&mut self) -> bool {
        let moved = self.navigator.go_back();
        if moved {
            self.emit_stack();
        }
        moved
    }

    /// Send a message from the end of the current path.
    pub fn send_message(&mut self) -> Result<Option<ReplyRequest>, NavigationError> {
        if self.is_mine() {
            return Err(NavigationError::OwnCard);
        }
        let request = self.navigator.terminal_action();
        if let Some(request) = &request {
            self.emit_reply(request.clone());
        }
        Ok(request)
    }

    fn is_reply_choice(&self, index: usize) -> bool {
        self.navigator
            .current()
            .items
            .get(index)
            .is_some_and(|item| item.is_message_action())
    }

    fn emit_reply(&self, request: ReplyRequest) {
        info!(
            card = ?self.card.id,
            depth = request.breadcrumb.len(),
            "Conversation reply requested"
        );
        emit_event(&self.sink, ClientEvent::Reply(request));
    }

    fn emit_stack(&self) {
        let titles = self
            .navigator
            .stack()
            .iter()
            .map(|item| item.title.clone())
            .collect();
        emit_event(
            &self.sink,
            ClientEvent::StackChanged(StackChangedPayload { titles }),
        );
    }
}
