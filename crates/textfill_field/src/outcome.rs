use crate::error::FieldError;

/// Result of one generation attempt as seen by a save hook.
///
/// `Degraded` carries the failure message; the target attribute is left
/// untouched when a hook sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Generated(String),
    Degraded(String),
}

impl GenerationOutcome {
    /// Generated text, if any. Empty text counts as nothing generated.
    pub fn generated(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Generated(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, GenerationOutcome::Degraded(_))
    }
}

impl From<Result<String, FieldError>> for GenerationOutcome {
    fn from(result: Result<String, FieldError>) -> Self {
        match result {
            Ok(text) => GenerationOutcome::Generated(text),
            Err(e) => GenerationOutcome::Degraded(e.to_string()),
        }
    }
}
