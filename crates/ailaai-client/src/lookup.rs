use serde::Serialize;

use crate::error::FetchError;

/// Display state of an entity referenced by an attachment while it is being
/// fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "camelCase")]
pub enum Lookup<T> {
    Loading,
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    /// Fold a fetch result into a display state. Only a definite "not found"
    /// ends loading; other failures keep the placeholder so a retry can
    /// still fill it.
    pub fn from_fetch(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => Self::Found(value),
            Err(FetchError::NotFound) => Self::NotFound,
            Err(e) => {
                tracing::debug!(error = %e, "Fetch failed, still loading");
                Self::Loading
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Loading => Lookup::Loading,
            Self::Found(value) => Lookup::Found(f(value)),
            Self::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> Default for Lookup<T> {
    fn default() -> Self {
        Self::Loading
    }
}
