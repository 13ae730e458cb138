use std::fmt;

/// Error types for telecheck operations
///
/// Remote verification failures are not represented here: they degrade to
/// `unknown` verdicts inside the result set instead of propagating.
#[derive(Debug)]
pub enum TeleCheckError {
    /// IO error (reading input, writing exports)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client construction error
    Http(reqwest::Error),

    /// JSON serialization error
    Json(serde_json::Error),

    /// Regex compilation error
    Regex(regex::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// File not found error
    FileNotFound(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// Nothing to check was provided
    EmptyInput(String),
}

impl fmt::Display for TeleCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeleCheckError::Io(err) => write!(f, "IO error: {err}"),
            TeleCheckError::Config(msg) => write!(f, "Configuration error: {msg}"),
            TeleCheckError::Http(err) => write!(f, "HTTP error: {err}"),
            TeleCheckError::Json(err) => write!(f, "JSON error: {err}"),
            TeleCheckError::Regex(err) => write!(f, "Regex error: {err}"),
            TeleCheckError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            TeleCheckError::FileNotFound(path) => write!(f, "File not found: {path}"),
            TeleCheckError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            TeleCheckError::EmptyInput(msg) => write!(f, "Empty input: {msg}"),
        }
    }
}

impl std::error::Error for TeleCheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TeleCheckError::Io(err) => Some(err),
            TeleCheckError::Http(err) => Some(err),
            TeleCheckError::Json(err) => Some(err),
            TeleCheckError::Regex(err) => Some(err),
            TeleCheckError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TeleCheckError {
    fn from(err: std::io::Error) -> Self {
        TeleCheckError::Io(err)
    }
}

impl From<reqwest::Error> for TeleCheckError {
    fn from(err: reqwest::Error) -> Self {
        TeleCheckError::Http(err)
    }
}

impl From<serde_json::Error> for TeleCheckError {
    fn from(err: serde_json::Error) -> Self {
        TeleCheckError::Json(err)
    }
}

impl From<regex::Error> for TeleCheckError {
    fn from(err: regex::Error) -> Self {
        TeleCheckError::Regex(err)
    }
}

impl From<toml::de::Error> for TeleCheckError {
    fn from(err: toml::de::Error) -> Self {
        TeleCheckError::TomlParsing(err)
    }
}

/// Type alias for Results using TeleCheckError
pub type Result<T> = std::result::Result<T, TeleCheckError>;
