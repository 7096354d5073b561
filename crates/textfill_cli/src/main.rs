//! CLI entry point for textfill.

mod cli;
mod commands;
mod output;

use clap::Parser;
use textfill_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load the nearest `.env`, searching from the current directory upwards.
/// Variables already set in the environment win.
fn load_dotenv() {
    let Ok(mut dir) = std::env::current_dir() else {
        return;
    };
    for _ in 0..32 {
        let env_file = dir.join(".env");
        if env_file.exists() {
            let _ = dotenvy::from_path(&env_file);
            break;
        }
        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => break,
        }
    }
}

fn init_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env().with_version(env!("CARGO_PKG_VERSION"));
    if config.log_level.is_none() {
        // stderr stays quiet unless asked for
        let level = if verbose {
            "textfill_llm=debug,textfill_field=debug,info"
        } else {
            "warn"
        };
        config = config.with_log_level(level);
    }
    if let Err(e) = textfill_observability::init(config) {
        output::warning(&format!("Logging disabled: {}", e));
    }
}

#[tokio::main]
async fn main() {
    load_dotenv();
    let cli = Cli::parse();
    output::init(cli.output);
    init_logging(cli.verbose);

    if let Err(e) = commands::handle(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
