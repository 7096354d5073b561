//! Generated text field: regenerates its attribute when the instruction changes.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use textfill_observability::{field_span, record_error};
use tracing::{Instrument, debug, info};

use crate::content::ContentRequest;
use crate::error::{FieldError, Result};
use crate::generator::ContentGenerator;
use crate::outcome::GenerationOutcome;

pub const DEFAULT_CONTENT_LENGTH: u32 = 300;
pub const DEFAULT_INSTRUCTION_FIELD: &str = "gpt_instruction";

/// Tags offered to the model for `html` fields unless overridden.
pub const DEFAULT_FIELD_TAGS: &[&str] = &[
    "p", "br", "b", "strong", "i", "em", "u", "ul", "ol", "li", "a", "h1", "h2", "h3", "h4",
    "h5", "h6",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Html,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Html => "html",
        }
    }

    /// Only html fields ask the model for markup.
    pub fn is_markup(&self) -> bool {
        matches!(self, FieldKind::Html)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(FieldKind::Text),
            "textarea" => Ok(FieldKind::Textarea),
            "html" => Ok(FieldKind::Html),
            other => Err(FieldError::InvalidKind(other.to_string())),
        }
    }
}

/// Host record holding named text attributes.
pub trait Record {
    /// `None` when the attribute does not exist, `Some(None)` when it is empty.
    fn text(&self, attribute: &str) -> Option<Option<String>>;

    fn set_text(&mut self, attribute: &str, value: String);
}

impl Record for HashMap<String, Option<String>> {
    fn text(&self, attribute: &str) -> Option<Option<String>> {
        self.get(attribute).cloned()
    }

    fn set_text(&mut self, attribute: &str, value: String) {
        self.insert(attribute.to_string(), Some(value));
    }
}

/// Options for one generated attribute on a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedField {
    attribute: String,
    kind: FieldKind,
    role: Option<String>,
    content_length: u32,
    instruction_field: String,
    allowed_tags: Vec<String>,
}

impl GeneratedField {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            kind: FieldKind::default(),
            role: None,
            content_length: DEFAULT_CONTENT_LENGTH,
            instruction_field: DEFAULT_INSTRUCTION_FIELD.to_string(),
            allowed_tags: DEFAULT_FIELD_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_content_length(mut self, length: u32) -> Self {
        self.content_length = length;
        self
    }

    pub fn with_instruction_field(mut self, field: impl Into<String>) -> Self {
        self.instruction_field = field.into();
        self
    }

    pub fn with_allowed_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn instruction_field(&self) -> &str {
        &self.instruction_field
    }

    pub fn allowed_tags(&self) -> &[String] {
        &self.allowed_tags
    }

    /// Request for `instruction`, with `previous_content` as context.
    pub fn request(&self, instruction: &str, previous_content: Option<String>) -> ContentRequest {
        let mut request =
            ContentRequest::new(instruction).with_max_body_length(self.content_length);
        if let Some(role) = &self.role {
            request = request.with_role_directive(role.clone());
        }
        if let Some(previous) = previous_content {
            request = request.with_previous_content(previous);
        }
        if self.kind.is_markup() {
            request = request.with_markup(self.allowed_tags.iter().cloned());
        }
        request
    }

    /// Save hook.
    ///
    /// Generates when the record's instruction is non-empty and differs from
    /// `previous_instruction` (the value last persisted). Generated text
    /// replaces the attribute; a degraded outcome leaves it as it was.
    /// Returns `None` when nothing was generated.
    pub async fn pre_save<R, G>(
        &self,
        record: &mut R,
        previous_instruction: Option<&str>,
        generator: &G,
    ) -> Result<Option<GenerationOutcome>>
    where
        R: Record + ?Sized,
        G: ContentGenerator + ?Sized,
    {
        let instruction = record.text(&self.instruction_field).ok_or_else(|| {
            FieldError::Config(format!(
                "record has no instruction attribute '{}'",
                self.instruction_field
            ))
        })?;

        let instruction = match instruction.filter(|i| !i.trim().is_empty()) {
            Some(instruction) => instruction,
            None => return Ok(None),
        };

        if previous_instruction == Some(instruction.as_str()) {
            debug!(attribute = %self.attribute, "Instruction unchanged, skipping generation");
            return Ok(None);
        }

        let span = field_span!(self.attribute.as_str(), self.instruction_field.as_str());
        let outcome = async {
            let request = self.request(&instruction, record.text(&self.attribute).flatten());

            let result = generator.generate(&request).await;
            if let Err(ref e) = result {
                record_error(e);
            }

            let outcome = GenerationOutcome::from(result);
            if let Some(text) = outcome.generated() {
                record.set_text(&self.attribute, text.to_string());
                info!(attribute = %self.attribute, chars = text.chars().count(), "Field regenerated");
            }
            outcome
        }
        .instrument(span)
        .await;

        Ok(Some(outcome))
    }
}
