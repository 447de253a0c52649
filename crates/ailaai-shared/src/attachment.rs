//! Message attachments.
//!
//! A message stores its attachments as JSON documents tagged by a `type`
//! field: one optional primary slot (`attachment`) plus a list of secondary
//! slots (`attachments`). Decoding is lenient at the edges: a slot that cannot
//! be understood is dropped and logged, it never fails the whole message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::constants::ATTACHMENT_TYPE_FIELD;
use crate::error::DecodeError;
use crate::types::{CardId, MediaId, MessageId, StickerId, StoryId};

/// Discriminator values of [`MessageAttachment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Reply,
    Card,
    Photos,
    Audio,
    Videos,
    Story,
    Sticker,
}

impl AttachmentKind {
    pub const ALL: [AttachmentKind; 7] = [
        Self::Reply,
        Self::Card,
        Self::Photos,
        Self::Audio,
        Self::Videos,
        Self::Story,
        Self::Sticker,
    ];

    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Reply => "reply",
            Self::Card => "card",
            Self::Photos => "photos",
            Self::Audio => "audio",
            Self::Videos => "videos",
            Self::Story => "story",
            Self::Sticker => "sticker",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "reply" => Some(Self::Reply),
            "card" => Some(Self::Card),
            "photos" => Some(Self::Photos),
            "audio" => Some(Self::Audio),
            "videos" => Some(Self::Videos),
            "story" => Some(Self::Story),
            "sticker" => Some(Self::Sticker),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Quotes another message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplyAttachment {
    pub message: MessageId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardAttachment {
    pub card: CardId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhotosAttachment {
    pub photos: Vec<MediaId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AudioAttachment {
    pub audio: MediaId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideosAttachment {
    pub videos: Vec<MediaId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryAttachment {
    pub story: StoryId,
}

/// A sticker from a sticker pack, with the photo it renders as and the short
/// text that is spoken when it is tapped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StickerAttachment {
    pub sticker: StickerId,
    pub photo: MediaId,
    pub message: String,
}

/// Everything a message can carry besides its text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageAttachment {
    Reply(ReplyAttachment),
    Card(CardAttachment),
    Photos(PhotosAttachment),
    Audio(AudioAttachment),
    Videos(VideosAttachment),
    Story(StoryAttachment),
    Sticker(StickerAttachment),
}

impl MessageAttachment {
    pub fn kind(&self) -> AttachmentKind {
        match self {
            Self::Reply(_) => AttachmentKind::Reply,
            Self::Card(_) => AttachmentKind::Card,
            Self::Photos(_) => AttachmentKind::Photos,
            Self::Audio(_) => AttachmentKind::Audio,
            Self::Videos(_) => AttachmentKind::Videos,
            Self::Story(_) => AttachmentKind::Story,
            Self::Sticker(_) => AttachmentKind::Sticker,
        }
    }

    /// Serialize to the tagged JSON form stored in a message slot.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Decode one attachment slot, keeping the reason it failed.
pub fn try_decode(raw: &str) -> Result<MessageAttachment, DecodeError> {
    let value: Value = serde_json::from_str(raw).map_err(DecodeError::Malformed)?;
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

    let tag = match object.get(ATTACHMENT_TYPE_FIELD) {
        Some(Value::String(tag)) => tag.as_str(),
        Some(Value::Null) | None => return Err(DecodeError::MissingType),
        Some(other) => return Err(DecodeError::UnknownType(other.to_string())),
    };
    let kind = AttachmentKind::from_tag(tag).ok_or_else(|| DecodeError::UnknownType(tag.to_string()))?;

    decode_kind(kind, value).map_err(|source| DecodeError::Shape { kind, source })
}

fn decode_kind(kind: AttachmentKind, value: Value) -> Result<MessageAttachment, serde_json::Error> {
    Ok(match kind {
        AttachmentKind::Reply => MessageAttachment::Reply(serde_json::from_value(value)?),
        AttachmentKind::Card => MessageAttachment::Card(serde_json::from_value(value)?),
        AttachmentKind::Photos => MessageAttachment::Photos(serde_json::from_value(value)?),
        AttachmentKind::Audio => MessageAttachment::Audio(serde_json::from_value(value)?),
        AttachmentKind::Videos => MessageAttachment::Videos(serde_json::from_value(value)?),
        AttachmentKind::Story => MessageAttachment::Story(serde_json::from_value(value)?),
        AttachmentKind::Sticker => MessageAttachment::Sticker(serde_json::from_value(value)?),
    })
}

/// Decode one attachment slot. Anything that cannot be decoded is logged and
/// treated as no attachment.
pub fn decode_one(raw: &str) -> Option<MessageAttachment> {
    match try_decode(raw) {
        Ok(attachment) => Some(attachment),
        Err(e) => {
            warn!(error = %e, len = raw.len(), "Dropping undecodable attachment");
            None
        }
    }
}

/// Decode the primary slot followed by every secondary slot, in order,
/// skipping the ones that do not decode.
pub fn decode_all(primary: Option<&str>, secondary: &[String]) -> Vec<MessageAttachment> {
    primary
        .into_iter()
        .chain(secondary.iter().map(String::as_str))
        .filter_map(decode_one)
        .collect()
}
