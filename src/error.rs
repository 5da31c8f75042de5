use thiserror::Error;

/// Error types that can occur while running a debate.
#[derive(Debug, Error)]
pub enum DebateError {
    /// HTTP request/response errors from a generation backend
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid parameters or misuse of the agent API
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Errors returned by the generation backend
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// A moderator or judge reply that is not a well-formed verdict
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// Generic error
    #[error("Generic error: {0}")]
    Generic(String),
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
    /// Retry attempts exceeded
    #[error("Retry attempts exceeded after {attempts} tries: {last_error}")]
    RetryExceeded { attempts: usize, last_error: String },
    /// The forced-decision judge returned an empty answer
    #[error("Judge returned an empty debate answer after round {round}")]
    JudgeNonAnswer { round: usize },
}

/// Converts reqwest HTTP errors into DebateErrors
impl From<reqwest::Error> for DebateError {
    fn from(err: reqwest::Error) -> Self {
        DebateError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for DebateError {
    fn from(err: serde_json::Error) -> Self {
        DebateError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}
