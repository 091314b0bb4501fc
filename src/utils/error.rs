use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error {method} {url}: status code: {status}, response text: {body}")]
    Api {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid UTF-8 in object body: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object store error: {message}")]
    ObjectStore { message: String },

    #[error("Token error: {message}")]
    Token { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl PluginError {
    /// True when the remote service answered with a non-200 status.
    pub fn is_api_error(&self) -> bool {
        matches!(self, PluginError::Api { .. })
    }

    /// Status code of an API error, if this is one. Checks use this to
    /// branch on e.g. 404 vs 5xx without string matching.
    pub fn api_status(&self) -> Option<u16> {
        match self {
            PluginError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PluginError>;
