//! Failure of a single upstream call.
//!
//! A [`FetchError`] never escapes the provider that produced it: the provider
//! renders it into its error payload with a prefix naming the provider.

use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// Network failure or non-2xx status.
    #[error("{0}")]
    Transport(String),

    /// The body was not the JSON we expected.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field required for the payload was absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// The provider answered but reported a problem in its payload.
    #[error("{0}")]
    Upstream(String),

    #[error("timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The URL carries the API key as a query parameter.
        FetchError::Transport(error_chain(&err.without_url()))
    }
}

/// Render an error with all of its sources, e.g.
/// `error sending request: client error (Connect): tcp connect error: Connection refused`.
pub(crate) fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
