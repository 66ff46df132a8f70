use thiserror::Error;

use super::format::FormatError;

/// Failure resolving a property or property resource.
///
/// One-shot semantics: every variant is terminal for the lookup that raised
/// it, there are no retries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("malformed resource locator '{locator}': {source}")]
    MalformedLocator {
        locator: String,
        source: url::ParseError,
    },

    #[error("unsupported scheme '{scheme}' in resource locator '{locator}'")]
    UnsupportedScheme { scheme: String, locator: String },

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("failed to read resource '{locator}': {source}")]
    Read {
        locator: String,
        source: std::io::Error,
    },

    #[error("failed to fetch resource '{locator}': {source}")]
    Fetch {
        locator: String,
        source: reqwest::Error,
    },

    #[error("failed to parse resource '{locator}': {source}")]
    Parse {
        locator: String,
        source: FormatError,
    },
}
