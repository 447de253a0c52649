//! # ailaai-shared
//!
//! Data model shared by every ailaai component: the card and message records
//! the API returns, the tagged attachment documents stored on messages, and
//! the conversation scripts stored on cards.
//!
//! Nothing here performs I/O. Decoders are lenient: malformed stored data is
//! logged through `tracing` and replaced by "nothing" (attachments) or an
//! empty script (conversations).

pub mod attachment;
pub mod constants;
pub mod conversation;
pub mod protocol;
pub mod types;

mod error;

pub use attachment::{AttachmentKind, MessageAttachment};
pub use conversation::{ConversationAction, ConversationItem};
pub use error::{ConversationError, DecodeError};
pub use protocol::{Card, Message, Sticker};
