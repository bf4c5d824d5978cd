use thiserror::Error;

pub type HtmlResult<T> = Result<T, HtmlError>;

/// Errors raised by the configuration and I/O surfaces of the crate.
///
/// Conversion itself never fails: malformed markup or style fragments are
/// dropped, and the only outcomes of a conversion are "no content" or a tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HtmlError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("YAML error: {0}")]
    YamlError(String),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("Failed to read '{path}': {message}")]
    IoError { path: String, message: String },
}

impl From<serde_yaml::Error> for HtmlError {
    fn from(err: serde_yaml::Error) -> Self {
        HtmlError::YamlError(err.to_string())
    }
}

impl From<serde_json::Error> for HtmlError {
    fn from(err: serde_json::Error) -> Self {
        HtmlError::JsonError(err.to_string())
    }
}
