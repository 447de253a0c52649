use serde::Serialize;

use crate::navigator::ReplyRequest;

pub const EVENT_CONVERSATION_REPLY: &str = "conversation-reply";
pub const EVENT_CONVERSATION_STACK_CHANGED: &str = "conversation-stack-changed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackChangedPayload {
    /// Titles of the ancestors of the node on screen, root first
    pub titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClientEvent {
    Reply(ReplyRequest),
    StackChanged(StackChangedPayload),
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reply(_) => EVENT_CONVERSATION_REPLY,
            Self::StackChanged(_) => EVENT_CONVERSATION_STACK_CHANGED,
        }
    }
}

/// Receiver of the events a conversation session produces, e.g. the reply
/// composer.
pub trait EventSink {
    fn emit(&self, event: &ClientEvent);
}

impl<F> EventSink for F
where
    F: Fn(&ClientEvent),
{
    fn emit(&self, event: &ClientEvent) {
        self(event)
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &ClientEvent) {}
}

pub fn emit_event<S: EventSink + ?Sized>(sink: &S, event: ClientEvent) {
    tracing::debug!(event = event.name(), "Emitting event");
    sink.emit(&event);
}
