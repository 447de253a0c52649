use thiserror::Error;

use crate::attachment::AttachmentKind;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed attachment document: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Attachment document is not an object")]
    NotAnObject,

    #[error("Attachment has no type discriminator")]
    MissingType,

    #[error("Unknown attachment type: {0}")]
    UnknownType(String),

    #[error("Invalid {kind} attachment: {source}")]
    Shape {
        kind: AttachmentKind,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConversationError {
    #[error("Malformed conversation document: {0}")]
    Malformed(#[from] serde_json::Error),
}
