use thiserror::Error;

/// Rejected conversation navigation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The chosen index is not one of the current node's children.
    #[error("No choice {index} (node has {available})")]
    NoSuchChild { index: usize, available: usize },

    /// Descending would exceed the configured depth limit.
    #[error("Conversation deeper than {max} levels")]
    TooDeep { max: usize },

    /// Card owners cannot reply to their own card.
    #[error("Cannot reply to your own card")]
    OwnCard,
}

/// Failure reported by whatever fetched a referenced entity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Not found")]
    NotFound,

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(String),
}

impl FetchError {
    /// Map an HTTP status code to the error it represents.
    pub fn from_status(status: u16) -> Self {
        match status {
            404 | 410 => Self::NotFound,
            other => Self::Status(other),
        }
    }
}
