//! textfill_field keeps a record's text attribute in sync with a
//! free-text instruction stored next to it.
//!
//! A host calls [`GeneratedField::pre_save`] before persisting a record. When
//! the instruction changed, the field asks a [`ContentGenerator`] for new
//! content and writes it to the target attribute. Generation failures are
//! reported as [`GenerationOutcome::Degraded`] and never block the save.
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use textfill_field::{FieldKind, GeneratedField, SettingsGenerator};
//!
//! # async fn run() -> textfill_field::Result<()> {
//! let generator = SettingsGenerator::from_env()?;
//! let field = GeneratedField::new("description").with_kind(FieldKind::Html);
//!
//! let mut record: HashMap<String, Option<String>> = HashMap::new();
//! record.insert("gpt_instruction".into(), Some("Describe a sunny loft".into()));
//! record.insert("description".into(), None);
//!
//! field.pre_save(&mut record, None, &generator).await?;
//! # Ok(())
//! # }
//! ```

pub mod content;
pub mod error;
pub mod field;
pub mod generator;
pub mod outcome;
pub mod settings;


pub use content::{ContentRequest, get_content, get_content_with};
pub use error::{FieldError, Result};
pub use field::{
    DEFAULT_CONTENT_LENGTH, DEFAULT_FIELD_TAGS, DEFAULT_INSTRUCTION_FIELD, FieldKind,
    GeneratedField, Record,
};
pub use generator::{ContentGenerator, SettingsGenerator};
pub use outcome::GenerationOutcome;
pub use settings::Settings;
