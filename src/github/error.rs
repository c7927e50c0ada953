// src/github/error.rs

/// Failure of a single API call. Any variant aborts the refresh pass
/// that issued the call; no partial results survive it.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// GitHub answers 403 both for exhausted quota and for rejected
    /// (expired/revoked) tokens, so one variant covers both.
    #[error("forbidden (rate limited or token rejected) at {url}")]
    RateLimited { url: String },

    /// Any other non-2xx status.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Connection, TLS or body-read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The `rel="next"` chain did not terminate within the page bound.
    /// A cyclic or runaway Link header fails the call instead of
    /// publishing duplicated data.
    #[error("pagination exceeded {max} pages at {url}")]
    PageLimit { url: String, max: usize },
}

impl RequestError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }
}

/// A refresh pass aborted by an upstream error, tagged with the stage
/// that was running. The previously published snapshot stays visible;
/// the next scheduled tick is the retry.
#[derive(Debug, thiserror::Error)]
#[error("refresh aborted during {stage}")]
pub struct RefreshFailure {
    pub stage: &'static str,
    #[source]
    pub source: RequestError,
}

impl RefreshFailure {
    pub fn at(stage: &'static str, source: RequestError) -> Self {
        Self { stage, source }
    }
}
