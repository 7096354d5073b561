//! `textfill prompt`: show what would be sent.

use anyhow::Result;
use textfill_field::Settings;

use super::{apply_overrides, build_request};
use crate::cli::GenerateArgs;
use crate::output;

pub fn handle(args: GenerateArgs) -> Result<()> {
    // the key is never used here, so a missing one is not an error
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(_) => Settings::from_lookup(|key| {
            if key == Settings::API_KEY_ENV {
                Some("unset".to_string())
            } else {
                std::env::var(key).ok()
            }
        })?,
    };
    let settings = apply_overrides(settings, &args)?;
    let conversation = build_request(&args)?.conversation(&settings)?;

    output::header(&format!(
        "Conversation for {} ({} messages)",
        settings.model_tier.model_id(),
        conversation.len()
    ));

    let mut table = output::table();
    output::table_header(&mut table, "Role", "Content");
    let items: Vec<_> = conversation
        .messages()
        .iter()
        .map(|m| {
            output::table_row(&mut table, m.role.as_str(), &m.content);
            (m.role.as_str(), m.content.as_str())
        })
        .collect();
    output::table_print(&table, &items);

    Ok(())
}
