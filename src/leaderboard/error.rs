use thiserror::Error;

/// Failures talking to a score store
///
/// None of these reach the player: the client logs them and carries on with
/// an empty board or a dropped submission.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// The request never produced an HTTP response
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status
    #[error("store returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// The response body was not the expected rows
    #[error("malformed response: {0}")]
    Decode(String),

    #[error("score file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The store is switched off
    #[error("store unavailable")]
    Unavailable,

    /// The blocking worker running the request panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<ureq::Error> for LeaderboardError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => LeaderboardError::Status {
                code,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => LeaderboardError::Transport(transport.to_string()),
        }
    }
}
