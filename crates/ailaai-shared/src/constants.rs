/// Application name
pub const APP_NAME: &str = "Ai là ai";

/// Default API base URL, used to turn media paths into absolute URLs
pub const DEFAULT_API_URL: &str = "https://api.ailaai.app";

/// Default tracing directive when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "ailaai_client=debug,ailaai_shared=info,warn";

/// Name of the discriminator field in a stored attachment document
pub const ATTACHMENT_TYPE_FIELD: &str = "type";
