use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::{self, MessageAttachment};
use crate::conversation::ConversationItem;
use crate::types::{CardId, GroupId, MediaId, MemberId, MessageId, PersonId, StickerId};

/// A chat message as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub id: Option<MessageId>,
    /// Group the message was posted in
    pub group: Option<GroupId>,
    /// Group member that sent it
    pub member: Option<MemberId>,
    pub text: Option<String>,
    /// Primary attachment slot (tagged JSON document)
    pub attachment: Option<String>,
    /// Secondary attachment slots (tagged JSON documents)
    pub attachments: Option<Vec<String>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Message {
    /// The decoded primary attachment, if any.
    pub fn attachment(&self) -> Option<MessageAttachment> {
        self.attachment.as_deref().and_then(attachment::decode_one)
    }

    /// The decoded secondary attachments.
    pub fn attachments(&self) -> Vec<MessageAttachment> {
        attachment::decode_all(None, self.attachments.as_deref().unwrap_or_default())
    }

    /// Primary attachment followed by the secondary ones.
    pub fn all_attachments(&self) -> Vec<MessageAttachment> {
        attachment::decode_all(
            self.attachment.as_deref(),
            self.attachments.as_deref().unwrap_or_default(),
        )
    }
}

/// A card as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Card {
    pub id: Option<CardId>,
    /// Owner
    pub person: Option<PersonId>,
    pub collaborators: Option<Vec<PersonId>>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub categories: Option<Vec<String>>,
    /// Serialized [`ConversationItem`] tree
    pub conversation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Card {
    pub fn conversation(&self) -> ConversationItem {
        ConversationItem::parse_or_default(self.conversation.as_deref())
    }

    /// Owner first, then collaborators.
    pub fn authors(&self) -> Vec<PersonId> {
        self.person
            .iter()
            .chain(self.collaborators.iter().flatten())
            .cloned()
            .collect()
    }

    pub fn is_owned_by(&self, person: &PersonId) -> bool {
        self.person.as_ref() == Some(person)
            || self.collaborators.iter().flatten().any(|p| p == person)
    }
}

/// A sticker as displayed in a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sticker {
    pub id: Option<StickerId>,
    pub photo: Option<MediaId>,
    pub message: Option<String>,
}

impl From<attachment::StickerAttachment> for Sticker {
    fn from(a: attachment::StickerAttachment) -> Self {
        Self {
            id: Some(a.sticker),
            photo: Some(a.photo),
            message: Some(a.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::AttachmentKind;

    #[test]
    fn test_message_from_api_json() {
        let raw = r#"{
            "id": "m2",
            "member": "mem1",
            "text": "look",
            "attachment": "{\"type\":\"photos\",\"photos\":[\"/p/1.jpg\"]}",
            "attachments": ["{\"type\":\"reply\",\"message\":\"m1\"}", "{broken"],
            "createdAt": "2023-06-01T12:00:00Z"
        }"#;

        let message: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(message.attachment().map(|a| a.kind()), Some(AttachmentKind::Photos));
        assert_eq!(message.attachments().len(), 1);

        let kinds: Vec<_> = message.all_attachments().iter().map(|a| a.kind()).collect();
        assert_eq!(kinds, vec![AttachmentKind::Photos, AttachmentKind::Reply]);
        assert!(message.created_at.is_some());
    }

    #[test]
    fn test_message_without_attachments() {
        let message: Message = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert!(message.attachment().is_none());
        assert!(message.all_attachments().is_empty());
    }

    #[test]
    fn test_card_conversation_and_authors() {
        let card = Card {
            person: Some("p1".into()),
            collaborators: Some(vec!["p2".into()]),
            conversation: Some(r#"{"title":"Menu","items":[{"title":"Order"}]}"#.into()),
            ..Card::default()
        };

        assert_eq!(card.conversation().items[0].title, "Order");
        assert_eq!(card.authors(), vec![PersonId::from("p1"), PersonId::from("p2")]);
        assert!(card.is_owned_by(&"p2".into()));
        assert!(!card.is_owned_by(&"p3".into()));
    }

    #[test]
    fn test_card_with_bad_conversation() {
        let card = Card {
            conversation: Some("not json".into()),
            ..Card::default()
        };
        assert_eq!(card.conversation(), ConversationItem::default());
    }

    #[test]
    fn test_sticker_from_attachment() {
        let sticker = Sticker::from(attachment::StickerAttachment {
            sticker: "st1".into(),
            photo: "/st/1.png".into(),
            message: "boo".into(),
        });
        assert_eq!(sticker.id, Some(StickerId::from("st1")));
        assert_eq!(sticker.message.as_deref(), Some("boo"));
    }
}
