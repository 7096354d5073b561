//! Command dispatch.

pub mod config;
pub mod generate;
pub mod prompt;

use anyhow::Result;
use textfill_field::{ContentRequest, FieldKind, GeneratedField, Settings};
use textfill_llm::ModelTier;

use crate::cli::{Cli, Command, GenerateArgs};

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate(args) => generate::handle(args).await,
        Command::Prompt(args) => prompt::handle(args),
        Command::Config => config::handle(),
    }
}

/// Apply command line overrides on top of `settings`.
fn apply_overrides(mut settings: Settings, args: &GenerateArgs) -> Result<Settings> {
    if let Some(language) = args.language.as_deref().filter(|l| !l.trim().is_empty()) {
        settings = settings.with_language(language);
    }
    if let Some(tier) = &args.tier {
        settings = settings.with_model_tier(tier.parse::<ModelTier>()?);
    }
    Ok(settings)
}

/// Build the content request the same way a generated field would.
fn build_request(args: &GenerateArgs) -> Result<ContentRequest> {
    let kind: FieldKind = args.kind.parse()?;
    let mut field = GeneratedField::new("content")
        .with_kind(kind)
        .with_content_length(args.length);
    if let Some(role) = &args.role {
        field = field.with_role(role.clone());
    }
    if !args.tags.is_empty() {
        field = field.with_allowed_tags(args.tags.iter().map(|t| t.trim().to_string()));
    }
    Ok(field.request(&args.instruction, args.previous.clone()))
}
