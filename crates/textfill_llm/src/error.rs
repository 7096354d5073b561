//! Error types for textfill_llm

use thiserror::Error;

/// Errors produced while building or sending a conversation.
///
/// Decoding never fails: a malformed reply is returned verbatim instead of
/// surfacing here.
#[derive(Error, Debug)]
pub enum Error {
    /// No credential was supplied for the named transport
    #[error("missing API key for {0}")]
    MissingApiKey(String),

    /// Invalid policy or collaborator configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// The remote endpoint answered with a non-success status
    #[error("provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The endpoint answered but the payload had no usable candidate
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Opaque failure returned by `GenerationClient::generate`
    #[error("generation failed: {0}")]
    Generation(String),
}

impl Error {
    pub fn provider_error(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Collapse any transport-level failure into a single `Generation` error.
    pub fn into_generation(self) -> Self {
        match self {
            Self::Generation(_) => self,
            other => Self::Generation(other.to_string()),
        }
    }

    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = Error::Config("max body length must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: max body length must be positive"
        );
    }

    #[test]
    fn test_into_generation_wraps_provider_error() {
        let err = Error::provider_error("OpenAI API error 429: rate limited").into_generation();
        assert!(err.is_generation());
        assert_eq!(
            err.to_string(),
            "generation failed: provider error: OpenAI API error 429: rate limited"
        );
    }

    #[test]
    fn test_into_generation_does_not_double_wrap() {
        let err = Error::Generation("boom".to_string()).into_generation();
        assert_eq!(err.to_string(), "generation failed: boom");
    }

    #[test]
    fn test_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json");
        let err = Error::from(json_err.unwrap_err());
        assert!(err.to_string().contains("expected value"));
    }
}
