use thiserror::Error;

/// Failures surfaced by the sync chain.
///
/// Transport and decode failures both end up as a single diagnostic log line
/// carrying the status and status text of the failing request.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("request to {url} failed: {}", describe_status(.status, .status_text))]
    Transport {
        url: String,
        status: Option<u16>,
        status_text: String,
    },
    #[error("could not decode response from {url} ({status} {status_text}): {reason}")]
    Decode {
        url: String,
        status: u16,
        status_text: String,
        reason: String,
    },
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("no rendered event matches '{0}'")]
    UnknownEvent(String),
}

fn describe_status(status: &Option<u16>, status_text: &str) -> String {
    match status {
        Some(code) => format!("{code} {status_text}"),
        None => status_text.to_string(),
    }
}

impl SyncError {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let status = err.status();
        SyncError::Transport {
            url: url.to_string(),
            status: status.map(|s| s.as_u16()),
            status_text: status
                .and_then(|s| s.canonical_reason())
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string()),
        }
    }

    /// HTTP status of the failing request, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Transport { status, .. } => *status,
            SyncError::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn status_text(&self) -> &str {
        match self {
            SyncError::Transport { status_text, .. } | SyncError::Decode { status_text, .. } => {
                status_text
            }
            SyncError::InvalidUrl { reason, .. } => reason,
            SyncError::UnknownEvent(_) => "unknown event",
        }
    }

    /// True for failures that came back from the network, as opposed to
    /// local input problems.
    pub fn is_remote(&self) -> bool {
        matches!(self, SyncError::Transport { .. } | SyncError::Decode { .. })
    }
}
