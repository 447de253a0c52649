//! Plain-text rendering of what the client derives from a stored record.
//! Backs the `ailaai-inspect` binary.

use std::fmt::Write;

use ailaai_shared::{Card, ConversationItem, Message};
use anyhow::{Context, Result};
use serde_json::Value;

use crate::attachments::MessageContent;
use crate::config::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Message,
    Card,
}

impl RecordKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "message" => Some(Self::Message),
            "card" => Some(Self::Card),
            _ => None,
        }
    }

    /// Cards are recognised by their conversation field.
    pub fn guess(record: &Value) -> Self {
        if record.get("conversation").is_some() {
            Self::Card
        } else {
            Self::Message
        }
    }
}

pub fn inspect(raw: &str, kind: Option<RecordKind>, config: &ClientConfig) -> Result<String> {
    let record: Value = serde_json::from_str(raw).context("Input is not a JSON document")?;
    match kind.unwrap_or_else(|| RecordKind::guess(&record)) {
        RecordKind::Message => {
            let message: Message =
                serde_json::from_value(record).context("Input is not a message record")?;
            Ok(describe_message(&message, config))
        }
        RecordKind::Card => {
            let card: Card = serde_json::from_value(record).context("Input is not a card record")?;
            Ok(describe_card(&card))
        }
    }
}

pub fn describe_message(message: &Message, config: &ClientConfig) -> String {
    let mut out = String::new();
    let attachments = message.all_attachments();
    let _ = writeln!(out, "{} attachment(s)", attachments.len());
    for attachment in &attachments {
        let encoded = attachment.encode().unwrap_or_default();
        let _ = writeln!(out, "  {}: {}", attachment.kind(), encoded);
    }

    let content = MessageContent::resolve(message);
    for target in content.pending_fetches() {
        let _ = writeln!(out, "fetch {target:?}");
    }
    for url in content.media_urls(config) {
        let _ = writeln!(out, "media {url}");
    }
    out
}

/// Outline of a card's conversation: one line per node, indented by depth,
/// with the breadcrumb a reply from there would carry.
pub fn describe_card(card: &Card) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", card.name.as_deref().unwrap_or("(unnamed card)"));
    let root = card.conversation();
    let mut path = Vec::new();
    outline(&root, 0, &mut path, &mut out);
    out
}

fn outline(item: &ConversationItem, depth: usize, path: &mut Vec<String>, out: &mut String) {
    path.push(item.title.clone());
    let marker = if item.is_message_action() {
        "reply"
    } else if item.is_leaf() {
        "send"
    } else {
        "open"
    };
    let _ = writeln!(
        out,
        "{:indent$}- [{marker}] {} => {}",
        "",
        item.title,
        path.join(" / "),
        indent = depth * 2
    );
    // Message actions reply immediately, their children are never shown.
    if !item.is_message_action() {
        for child in &item.items {
            outline(child, depth + 1, path, out);
        }
    }
    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_kind() {
        let card: Value = serde_json::from_str(r#"{"conversation": null}"#).unwrap();
        assert_eq!(RecordKind::guess(&card), RecordKind::Card);
        let message: Value = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(RecordKind::guess(&message), RecordKind::Message);
        assert_eq!(RecordKind::from_name(" CARD "), Some(RecordKind::Card));
        assert_eq!(RecordKind::from_name("story"), None);
    }

    #[test]
    fn test_inspect_message() {
        let raw = r#"{"attachment": "{\"type\":\"card\",\"card\":\"c1\"}", "attachments": ["nope"]}"#;
        let out = inspect(raw, None, &ClientConfig::default()).unwrap();
        assert!(out.starts_with("1 attachment(s)\n"));
        assert!(out.contains("  card: "));
        assert!(out.contains("fetch Card"));
    }

    #[test]
    fn test_inspect_card_outline() {
        let raw = r#"{
            "name": "Menu card",
            "conversation": "{\"title\":\"Menu\",\"items\":[{\"title\":\"Order\"},{\"title\":\"Ask\",\"action\":\"message\"}]}"
        }"#;
        let out = inspect(raw, Some(RecordKind::Card), &ClientConfig::default()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Menu card",
                "- [open] Menu => Menu",
                "  - [send] Order => Menu / Order",
                "  - [reply] Ask => Menu / Ask",
            ]
        );
    }

    #[test]
    fn test_inspect_rejects_non_json() {
        assert!(inspect("not json", None, &ClientConfig::default()).is_err());
    }
}
