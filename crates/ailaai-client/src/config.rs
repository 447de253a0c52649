//! Client configuration loaded from environment variables.
//!
//! Everything has a default, so an embedding application can start without
//! setting any variable.

use ailaai_shared::constants::{DEFAULT_API_URL, DEFAULT_LOG_FILTER};
use ailaai_shared::types::MediaId;
use url::Url;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL media paths are resolved against.
    /// Env: `AILAAI_API_URL`
    /// Default: `https://api.ailaai.app/`
    pub api_url: Url,

    /// Tracing directive used when `RUST_LOG` is unset.
    /// Env: `AILAAI_LOG`
    pub log_filter: String,

    /// Deepest conversation level a viewer may open (0 = unlimited).
    /// Env: `AILAAI_MAX_DEPTH`
    /// Default: `0`
    pub max_depth: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid URL"),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            max_depth: 0,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from any variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = var("AILAAI_API_URL") {
            match parse_api_url(&url) {
                Ok(url) => config.api_url = url,
                Err(e) => {
                    tracing::warn!(value = %url, error = %e, "Invalid AILAAI_API_URL, using default");
                }
            }
        }

        if let Some(filter) = var("AILAAI_LOG") {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        if let Some(val) = var("AILAAI_MAX_DEPTH") {
            match val.trim().parse::<usize>() {
                Ok(n) => config.max_depth = n,
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid AILAAI_MAX_DEPTH, using default");
                }
            }
        }

        config
    }

    /// Absolute URL of an uploaded photo, video or audio clip. Each path
    /// segment is percent-encoded and appended to the API URL's path. Media
    /// that is already an absolute http(s) URL is returned as is.
    pub fn media_url(&self, media: &MediaId) -> String {
        let path = media.as_str();
        if let Ok(absolute) = Url::parse(path) {
            if is_http(&absolute) {
                return absolute.into();
            }
        }

        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url.into()
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

fn parse_api_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !is_http(&url) {
        return Err(format!("expected an http(s) URL, got scheme {}", url.scheme()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err("missing host".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("API URL must not carry a query or fragment".to_string());
    }
    Ok(url)
}
