//! `textfill generate`.

use anyhow::{Result, bail};
use textfill_field::Settings;
use textfill_llm::GenerationClient;

use super::{apply_overrides, build_request};
use crate::cli::GenerateArgs;
use crate::output;

pub async fn handle(args: GenerateArgs) -> Result<()> {
    if !(0.0..=2.0).contains(&args.temperature) {
        bail!("temperature must be between 0 and 2, got {}", args.temperature);
    }

    let settings = apply_overrides(Settings::from_env()?, &args)?;
    let request = build_request(&args)?;
    let mut conversation = request.conversation(&settings)?;
    let client = GenerationClient::new(settings.transport()?);

    let spinner = output::spinner(&format!(
        "Generating with {}...",
        settings.model_tier.model_id()
    ));

    match client.generate(&mut conversation, args.temperature).await {
        Ok(content) => {
            output::spinner_done(&spinner);
            output::content(
                &content,
                serde_json::json!({
                    "model": settings.model_tier.model_id(),
                    "language": settings.language,
                }),
            );
            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, "Generation failed");
            Err(e.into())
        }
    }
}
