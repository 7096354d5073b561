use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObservabilityError {
    /// A global subscriber is already installed.
    #[error("logging init failed: {0}")]
    InitFailed(String),

    /// The log filter directive could not be parsed.
    #[error("invalid logging config: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ObservabilityError::Config("invalid log filter 'x=='".to_string());
        assert_eq!(err.to_string(), "invalid logging config: invalid log filter 'x=='");
        assert!(ObservabilityError::InitFailed("already set".into())
            .to_string()
            .starts_with("logging init failed"));
    }
}
