use serde::{Deserialize, Serialize};

// Server-issued identifiers are opaque strings; the wrappers only keep the
// different kinds of reference from being mixed up.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a chat message.
    MessageId
);
string_id!(
    /// Identifier of a card.
    CardId
);
string_id!(
    /// Identifier of a published story.
    StoryId
);
string_id!(
    /// Identifier of a sticker inside a sticker pack.
    StickerId
);
string_id!(
    /// Server path of an uploaded photo, video or audio clip.
    MediaId
);
string_id!(PersonId);
string_id!(GroupId);
string_id!(MemberId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_bare_string() {
        let id = CardId::new("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
        let back: CardId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(MediaId::from("/static/photos/1.jpg").to_string(), "/static/photos/1.jpg");
    }
}
