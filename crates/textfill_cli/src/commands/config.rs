//! `textfill config`.

use anyhow::Result;
use textfill_field::Settings;
use textfill_llm::OpenAIConfig;

use crate::output;

pub fn handle() -> Result<()> {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            output::warning(&e.to_string());
            output::dim("Set TEXTFILL_API_KEY in the environment or a .env file.");
            return Ok(());
        }
    };

    let base_url = settings
        .base_url
        .clone()
        .unwrap_or_else(|| OpenAIConfig::new(String::new()).base_url);
    let log_filter = std::env::var("TEXTFILL_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "(default)".to_string());

    output::header("Settings");
    output::kv("api_key", &settings.masked_key());
    output::kv("model_tier", settings.model_tier.as_str());
    output::kv("model", settings.model_tier.model_id());
    output::kv("language", &settings.language);
    output::kv("base_url", &base_url);
    output::kv("log", &log_filter);

    Ok(())
}
