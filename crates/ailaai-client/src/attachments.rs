//! Folding a message's attachments into what the message bubble shows.
//!
//! A bubble has one slot per attachment kind. When a message carries several
//! attachments of the same kind the last one wins; in practice only a reply
//! is ever combined with another attachment.

use ailaai_shared::types::{CardId, MediaId, MessageId, StoryId};
use ailaai_shared::{Message, MessageAttachment, Sticker};
use serde::Serialize;
use tracing::trace;

use crate::config::ClientConfig;

/// An entity that has to be fetched before it can be shown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum FetchTarget {
    Card(CardId),
    Message(MessageId),
    Story(StoryId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    pub card: Option<CardId>,
    pub reply: Option<MessageId>,
    pub story: Option<StoryId>,
    pub photos: Option<Vec<MediaId>>,
    pub videos: Option<Vec<MediaId>>,
    pub audio: Option<MediaId>,
    pub sticker: Option<Sticker>,
}

impl MessageContent {
    pub fn resolve(message: &Message) -> Self {
        Self::from_attachments(message.all_attachments())
    }

    pub fn from_attachments(attachments: impl IntoIterator<Item = MessageAttachment>) -> Self {
        let mut content = Self::default();
        for attachment in attachments {
            trace!(kind = %attachment.kind(), "Applying attachment");
            match attachment {
                MessageAttachment::Card(a) => content.card = Some(a.card),
                MessageAttachment::Photos(a) => content.photos = Some(a.photos),
                MessageAttachment::Videos(a) => content.videos = Some(a.videos),
                MessageAttachment::Audio(a) => content.audio = Some(a.audio),
                MessageAttachment::Reply(a) => content.reply = Some(a.message),
                MessageAttachment::Story(a) => content.story = Some(a.story),
                MessageAttachment::Sticker(a) => content.sticker = Some(Sticker::from(a)),
            }
        }
        content
    }

    /// Content of a message shown as the quoted part of another message.
    /// Quotes do not nest, so the quoted message's own reply is dropped.
    pub fn as_quoted(mut self) -> Self {
        self.reply = None;
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// References a collaborator must fetch, card first, then the replied-to
    /// message, then the story.
    pub fn pending_fetches(&self) -> Vec<FetchTarget> {
        let mut targets = Vec::new();
        if let Some(card) = &self.card {
            targets.push(FetchTarget::Card(card.clone()));
        }
        if let Some(reply) = &self.reply {
            targets.push(FetchTarget::Message(reply.clone()));
        }
        if let Some(story) = &self.story {
            targets.push(FetchTarget::Story(story.clone()));
        }
        targets
    }

    /// Non-empty photo list, if any.
    pub fn photos(&self) -> Option<&[MediaId]> {
        self.photos.as_deref().filter(|p| !p.is_empty())
    }

    /// Non-empty video list, if any.
    pub fn videos(&self) -> Option<&[MediaId]> {
        self.videos.as_deref().filter(|v| !v.is_empty())
    }

    /// Absolute URLs of every media item in display order: photos, videos,
    /// audio, then the sticker image.
    pub fn media_urls(&self, config: &ClientConfig) -> Vec<String> {
        self.photos()
            .into_iter()
            .flatten()
            .chain(self.videos().into_iter().flatten())
            .chain(self.audio.iter())
            .chain(self.sticker.iter().filter_map(|s| s.photo.as_ref()))
            .map(|media| config.media_url(media))
            .collect()
    }
}
